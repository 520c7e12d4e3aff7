//! Print the roster for a scope.

use std::fmt::Write as _;

use optica_admin::roster::{RosterOutcome, RosterResolver};
use optica_core::Scope;

/// Resolve the roster for `shop` and print it.
///
/// # Errors
///
/// Returns an error if the store cannot be set up, or if the roster
/// resolves to an error outcome.
pub async fn print(
    shop: Option<&str>,
    json: bool,
    use_demo: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(use_demo).await?;

    let scope = Scope::from_filter(shop);
    tracing::info!(scope = %scope, demo = use_demo, "Resolving roster");
    let outcome = RosterResolver::new(store).resolve(scope).await;

    let rendered = if json {
        serde_json::to_string_pretty(&outcome)?
    } else {
        render_text(&outcome)
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }

    if let RosterOutcome::Error { reason } = outcome {
        return Err(reason.into());
    }
    Ok(())
}

/// One line per entry; visitors from another shop are marked with `*`.
fn render_text(outcome: &RosterOutcome) -> String {
    let mut out = String::new();
    match outcome {
        RosterOutcome::Ok { roster } | RosterOutcome::Partial { roster, .. } => {
            for entry in roster {
                let marker = if entry.show_shop_marker() { " *" } else { "" };
                let _ = writeln!(out, "{}\t{}{marker}", entry.name, entry.provenance);
            }
            if roster.is_empty() {
                out.push_str("(no clients)\n");
            }
            if let Some(warning) = outcome.warning() {
                let _ = writeln!(out, "warning: {warning}");
            }
        }
        RosterOutcome::Error { reason } => {
            let _ = writeln!(out, "error: {reason}");
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use optica_admin::roster::{ClientView, RosterError, RosterWarning};
    use optica_core::{ClientId, ClientName, Provenance, ShopId};

    use super::*;

    fn view(name: &str, home_shop: Option<ShopId>, provenance: Provenance) -> ClientView {
        ClientView {
            id: ClientId::new_random(),
            name: ClientName::parse(name).unwrap(),
            home_shop,
            provenance,
        }
    }

    #[test]
    fn test_render_text_marks_visitors() {
        let outcome = RosterOutcome::Partial {
            roster: vec![
                view("Alice", Some(ShopId::new_random()), Provenance::Native),
                view("Carol", Some(ShopId::new_random()), Provenance::Visitor),
                view("Dave", None, Provenance::Visitor),
            ],
            warning: RosterWarning::PartialVisitorFailure,
        };

        let text = render_text(&outcome);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Alice\tnative");
        assert_eq!(lines[1], "Carol\tvisitor *");
        assert_eq!(lines[2], "Dave\tvisitor");
        assert!(lines[3].starts_with("warning:"));
    }

    #[test]
    fn test_render_text_empty_and_error() {
        assert_eq!(
            render_text(&RosterOutcome::Ok { roster: vec![] }),
            "(no clients)"
        );
        assert_eq!(
            render_text(&RosterOutcome::Error {
                reason: RosterError::StoreUnavailable
            }),
            "error: client store unavailable"
        );
    }

    #[tokio::test]
    async fn test_print_demo_roster() {
        assert!(print(Some("particular"), true, true).await.is_ok());
    }
}
