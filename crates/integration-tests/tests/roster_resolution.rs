//! Roster resolution contract, exercised end to end against the in-memory
//! store through the public admin API.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use optica_admin::models::{CreateClientInput, CreatePrescriptionInput, CreateShopInput};
use optica_admin::roster::{ClientView, RosterFeed, RosterOutcome, RosterResolver, RosterWarning};
use optica_admin::services::{
    AssignmentOptions, AssignmentRequest, AssignmentService, ClientListQuery, ClientListService,
};
use optica_admin::store::MemoryStore;
use optica_admin::store::memory::Table;
use optica_core::{ClientName, Provenance, Scope};
use optica_integration_tests::demo_store;

fn names(roster: &[ClientView]) -> Vec<&str> {
    roster.iter().map(|v| v.name.as_str()).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn shop_roster_lists_natives_then_visitor() {
    let (store, ids) = demo_store().await;
    let outcome = RosterResolver::new(store).resolve(Scope::Shop(ids.shops[0])).await;

    let roster = outcome.into_roster().unwrap();
    let annotated: Vec<(&str, Provenance)> =
        roster.iter().map(|v| (v.name.as_str(), v.provenance)).collect();
    assert_eq!(
        annotated,
        vec![
            ("Alice", Provenance::Native),
            ("Bob", Provenance::Native),
            ("Carol", Provenance::Visitor),
        ]
    );
}

#[tokio::test]
async fn unaffiliated_roster_is_isolated() {
    let (store, _) = demo_store().await;
    let outcome = RosterResolver::new(store)
        .resolve(Scope::from_filter(Some("particular")))
        .await;

    assert_eq!(names(outcome.roster().unwrap()), vec!["Dave"]);
}

#[tokio::test]
async fn all_roster_contains_everyone() {
    let (store, _) = demo_store().await;
    let outcome = RosterResolver::new(store).resolve(Scope::All).await;

    assert_eq!(
        names(outcome.roster().unwrap()),
        vec!["Alice", "Bob", "Carol", "Dave"]
    );
}

#[tokio::test]
async fn visitor_failure_degrades_to_partial() {
    let (store, ids) = demo_store().await;
    store.fail_reads(Table::Prescriptions, true);

    let outcome = RosterResolver::new(store).resolve(Scope::Shop(ids.shops[0])).await;

    assert_eq!(outcome.warning(), Some(RosterWarning::PartialVisitorFailure));
    assert_eq!(names(outcome.roster().unwrap()), vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn deleted_client_is_excluded_without_error() {
    let (store, ids) = demo_store().await;
    let xavier = store
        .add_client(CreateClientInput::new(
            ClientName::parse("Xavier").unwrap(),
            Some(ids.shops[1]),
        ))
        .await;
    store
        .add_prescription(CreatePrescriptionInput::new(
            xavier.id,
            Some(ids.shops[0]),
            NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
        ))
        .await;
    store.remove_client(xavier.id).await.unwrap();

    let outcome = RosterResolver::new(store).resolve(Scope::Shop(ids.shops[0])).await;

    assert!(matches!(outcome, RosterOutcome::Ok { .. }));
    assert_eq!(names(outcome.roster().unwrap()), vec!["Alice", "Bob", "Carol"]);
}

// ============================================================================
// Properties over a larger data set
// ============================================================================

/// Three shops, clients spread across them and unaffiliated, and visits
/// scattered deterministically.
async fn crowded_store() -> (Arc<MemoryStore>, Vec<optica_core::ShopId>) {
    let store = Arc::new(MemoryStore::new());
    let mut shops = Vec::new();
    for name in ["Ótica Sol", "Ótica Lua", "Ótica Mar"] {
        shops.push(
            store
                .add_shop(CreateShopInput {
                    name: name.to_string(),
                    ..CreateShopInput::default()
                })
                .await
                .id,
        );
    }

    let first_names = [
        "Ana", "bruno", "Cecília", "Davi", "Élton", "fábio", "Gisele", "Hélio", "iara", "José",
        "Jose", "Lúcia",
    ];
    for (i, name) in first_names.iter().enumerate() {
        let home = match i % 4 {
            3 => None,
            n => shops.get(n).copied(),
        };
        let client = store
            .add_client(CreateClientInput::new(ClientName::parse(name).unwrap(), home))
            .await;
        for visit in 0..(i % 3) {
            let shop = match (i + visit) % 4 {
                3 => None,
                n => shops.get(n).copied(),
            };
            let day = u32::try_from(visit + 1).unwrap();
            store
                .add_prescription(CreatePrescriptionInput::new(
                    client.id,
                    shop,
                    NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
                ))
                .await;
        }
    }
    (store, shops)
}

#[tokio::test]
async fn rosters_are_unique_sorted_and_scoped() {
    let (store, shops) = crowded_store().await;
    let resolver = RosterResolver::new(Arc::clone(&store));
    let everyone = resolver.resolve(Scope::All).await.into_roster().unwrap();

    let mut scopes = vec![Scope::All, Scope::Unaffiliated];
    scopes.extend(shops.iter().copied().map(Scope::Shop));

    for scope in scopes {
        let roster = resolver.resolve(scope).await.into_roster().unwrap();

        let ids: HashSet<_> = roster.iter().map(|v| v.id).collect();
        assert_eq!(ids.len(), roster.len(), "duplicate entries for {scope:?}");

        for pair in roster.windows(2) {
            assert_ne!(
                optica_core::compare_names(pair[0].name.as_str(), pair[1].name.as_str()),
                std::cmp::Ordering::Greater,
                "out of order for {scope:?}"
            );
        }

        for view in &roster {
            match (scope, view.provenance) {
                (Scope::Shop(shop), Provenance::Native) => {
                    assert_eq!(view.home_shop, Some(shop));
                }
                (Scope::Shop(shop), Provenance::Visitor) => {
                    assert_ne!(view.home_shop, Some(shop));
                }
                (Scope::Unaffiliated, provenance) => {
                    assert_eq!(view.home_shop, None);
                    assert_eq!(provenance, Provenance::Native);
                }
                (Scope::All, provenance) => assert_eq!(provenance, Provenance::Native),
            }
        }

        let natives = everyone
            .iter()
            .filter(|v| optica_admin::models::Affiliation::from(scope).matches(v.home_shop));
        for native in natives {
            assert!(ids.contains(&native.id), "missing native for {scope:?}");
        }
    }

    assert_eq!(everyone.len(), 12);
    let jose: Vec<&str> = everyone
        .iter()
        .map(|v| v.name.as_str())
        .filter(|n| n.starts_with("Jos"))
        .collect();
    assert_eq!(jose, vec!["Jose", "José"]);
}

// ============================================================================
// Call sites
// ============================================================================

#[tokio::test]
async fn both_call_sites_agree_on_membership() {
    let (store, ids) = demo_store().await;
    let scope = Scope::Shop(ids.shops[0]);

    let listing = ClientListService::new(Arc::clone(&store))
        .list(&ClientListQuery {
            scope,
            search: None,
        })
        .await
        .unwrap()
        .into_roster()
        .unwrap();

    let AssignmentOptions::Refresh { outcome } = AssignmentService::new(RosterResolver::new(
        Arc::clone(&store),
    ))
    .options(AssignmentRequest {
        scope,
        ..AssignmentRequest::default()
    })
    .await
    else {
        panic!("expected refreshed options");
    };
    let options = outcome.into_roster().unwrap();

    let listed: Vec<_> = listing.iter().map(|row| row.client.id).collect();
    let offered: Vec<_> = options.iter().map(|option| option.client.id).collect();
    assert_eq!(listed, offered);
    assert_eq!(
        listing[2].last_prescription,
        NaiveDate::from_ymd_opt(2026, 3, 3)
    );
}

#[tokio::test]
async fn feed_discards_superseded_request() {
    let (store, ids) = demo_store().await;
    let feed = RosterFeed::new(RosterResolver::new(store));

    let first = feed.begin(Scope::Shop(ids.shops[0]));
    let second = feed.begin(Scope::Unaffiliated);
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_none());
    let (_, outcome) = second.unwrap();
    assert_eq!(names(outcome.roster().unwrap()), vec!["Dave"]);
}
