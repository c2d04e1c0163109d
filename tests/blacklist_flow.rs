//! Overdue sweep and blacklist lifecycle tests

mod common;

use chrono::{Duration, Utc};

use toolcrib::models::blacklist::{ManualBlacklist, RemoveBlacklist};
use toolcrib::models::checkout::ReturnRequest;
use toolcrib::AppError;

use common::{check_out, create_item, create_team, engine};

#[tokio::test]
async fn sweep_blacklists_overdue_team_exactly_once() {
    let state = engine();
    let item = create_item(&state, "Drill #1", 3).await;
    let team = create_team(&state, "team A");

    // Due in 24h; evaluate as of 3 days from now so the record is overdue
    check_out(&state, &item, &team, 3, 24).await.unwrap();
    let as_of = Utc::now() + Duration::days(3);

    let first = state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(as_of, Duration::zero())
        .await
        .unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].team_id, team.id);
    assert!(first[0].reason.contains("1 item(s) overdue"));

    // Idempotent: the second pass creates nothing
    let second = state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(as_of, Duration::zero())
        .await
        .unwrap();
    assert!(second.is_empty());

    // Single active entry per team
    let active = state.services.blacklist.active_blacklists().unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn grace_window_delays_blacklisting() {
    let state = engine();
    let item = create_item(&state, "Generator", 1).await;
    let team = create_team(&state, "site crew");

    check_out(&state, &item, &team, 1, 24).await.unwrap();
    let as_of = Utc::now() + Duration::hours(36);

    // 12h past due but inside a 24h grace window
    let none = state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(as_of, Duration::hours(24))
        .await
        .unwrap();
    assert!(none.is_empty());

    // Outside the window it triggers
    let some = state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(as_of, Duration::hours(6))
        .await
        .unwrap();
    assert_eq!(some.len(), 1);
}

#[tokio::test]
async fn multiple_overdue_items_yield_one_entry() {
    let state = engine();
    let drill = create_item(&state, "Drill", 2).await;
    let saw = create_item(&state, "Saw", 2).await;
    let team = create_team(&state, "team B");

    check_out(&state, &drill, &team, 1, 24).await.unwrap();
    check_out(&state, &saw, &team, 1, 24).await.unwrap();

    let entries = state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(Utc::now() + Duration::days(2), Duration::zero())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].reason.contains("2 item(s) overdue"));
}

#[tokio::test]
async fn blacklisted_team_cannot_check_out() {
    let state = engine();
    let item = create_item(&state, "Drill #1", 3).await;
    let team = create_team(&state, "team A");

    check_out(&state, &item, &team, 3, 24).await.unwrap();
    state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(Utc::now() + Duration::days(3), Duration::zero())
        .await
        .unwrap();

    let other = create_item(&state, "Sander", 2).await;
    let err = check_out(&state, &other, &team, 1, 24).await.unwrap_err();
    assert!(matches!(err, AppError::TeamBlacklisted { team_id, .. } if team_id == team.id));
    assert!(!err.is_retryable());

    // Eligibility gate left the target item's stock untouched
    assert_eq!(
        state
            .services
            .inventory
            .available_quantity(other.id)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn unblacklist_gated_on_outstanding_equipment() {
    let state = engine();
    let item = create_item(&state, "Drill #1", 3).await;
    let team = create_team(&state, "team A");

    let record = check_out(&state, &item, &team, 3, 24).await.unwrap();
    state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(Utc::now() + Duration::days(3), Duration::zero())
        .await
        .unwrap();

    // Outstanding equipment blocks removal, overdue or not
    let err = state
        .services
        .blacklist
        .remove_from_blacklist(RemoveBlacklist {
            team_id: team.id,
            removed_by: 9,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StillHasOpenItems { open: 1, .. }));
    assert!(state.services.blacklist.is_team_blacklisted(team.id).unwrap());

    // Return everything; on_loan drops back to zero and the outcome
    // signals that removal would now succeed
    let outcome = state
        .services
        .coordinator
        .return_equipment(ReturnRequest {
            checkout_id: record.id,
            quantity: 3,
            condition: None,
            notes: None,
        })
        .await
        .unwrap();
    assert!(outcome.eligible_for_unblacklist);
    assert_eq!(
        state
            .services
            .inventory
            .available_quantity(item.id)
            .await
            .unwrap(),
        3
    );

    let closed = state
        .services
        .blacklist
        .remove_from_blacklist(RemoveBlacklist {
            team_id: team.id,
            removed_by: 9,
            notes: Some("returned everything".into()),
        })
        .await
        .unwrap();
    assert!(closed.removed_at.is_some());
    assert!(!state.services.blacklist.is_team_blacklisted(team.id).unwrap());

    // The closed entry stays in the audit history
    let history = state.services.blacklist.history(team.id).unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].is_active());
}

#[tokio::test]
async fn manual_blacklist_respects_single_active_entry() {
    let state = engine();
    let team = create_team(&state, "team C");

    state
        .services
        .blacklist
        .manual_blacklist(ManualBlacklist {
            team_id: team.id,
            blacklisted_by: 5,
            reason: "repeated late returns".into(),
        })
        .await
        .unwrap();

    let err = state
        .services
        .blacklist
        .manual_blacklist(ManualBlacklist {
            team_id: team.id,
            blacklisted_by: 5,
            reason: "again".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyBlacklisted(id) if id == team.id));

    // The sweep also refuses to double-enter a manually blacklisted team
    let entries = state
        .services
        .blacklist
        .evaluate_and_blacklist_overdue(Utc::now() + Duration::days(30), Duration::zero())
        .await
        .unwrap();
    assert!(entries.is_empty());
    assert_eq!(state.services.blacklist.active_blacklists().unwrap().len(), 1);
}

#[tokio::test]
async fn removing_a_clean_team_is_not_blacklisted() {
    let state = engine();
    let team = create_team(&state, "team D");

    let err = state
        .services
        .blacklist
        .remove_from_blacklist(RemoveBlacklist {
            team_id: team.id,
            removed_by: 1,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotBlacklisted(id) if id == team.id));
}

#[tokio::test]
async fn inactive_team_is_refused_at_the_gate() {
    let state = engine();
    let item = create_item(&state, "Forklift charger", 1).await;
    let team = create_team(&state, "seasonal");

    state.services.teams.set_active(team.id, false).unwrap();

    let err = check_out(&state, &item, &team, 1, 24).await.unwrap_err();
    assert!(matches!(err, AppError::TeamInactive(id) if id == team.id));
}

#[tokio::test]
async fn sweep_spawn_honors_the_enabled_flag() {
    use std::sync::Arc;
    use toolcrib::{CoreConfig, CoreState, NoopNotifier};

    let mut config = CoreConfig::default();
    config.sweep.enabled = false;
    let disabled = CoreState::new(config, Arc::new(NoopNotifier));
    assert!(disabled.services.sweep.clone().spawn().is_none());

    let enabled = engine();
    let handle = enabled
        .services
        .sweep
        .clone()
        .spawn()
        .expect("sweep is enabled by default");
    handle.abort();
}

#[tokio::test]
async fn sweep_service_runs_with_configured_grace() {
    let state = engine();
    let item = create_item(&state, "Rivet gun", 1).await;
    let team = create_team(&state, "team E");

    check_out(&state, &item, &team, 1, 1).await.unwrap();

    // Default grace is zero; two hours from now the loan is overdue
    let entries = state
        .services
        .sweep
        .run_once(Utc::now() + Duration::hours(2))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].team_id, team.id);
}
