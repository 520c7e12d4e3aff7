//! Print the dashboard summary.

use std::fmt::Write as _;

use optica_admin::services::{DashboardService, DashboardSummary};

/// Summarize the store and print it.
///
/// # Errors
///
/// Returns an error if the store cannot be set up or read.
pub async fn print(json: bool, use_demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(use_demo).await?;
    let summary = DashboardService::new(store).summary().await?;

    let rendered = if json {
        serde_json::to_string_pretty(&summary)?
    } else {
        render_text(&summary)
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

fn render_text(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "shops: {}\tclients: {}\tprescriptions: {}",
        summary.shops, summary.clients, summary.prescriptions
    );
    let _ = writeln!(
        out,
        "paid: {}\tby shop: {}\tby client: {}",
        summary.totals.paid, summary.totals.paid_by_shop, summary.totals.paid_by_client
    );
    for visit in &summary.recent {
        let _ = writeln!(out, "{}\t{}", visit.prescribed_on, visit.client);
    }
    out.trim_end().to_string()
}
