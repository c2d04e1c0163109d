//! Shared helpers for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use toolcrib::models::checkout::{CheckoutRecord, CheckoutRequest};
use toolcrib::models::equipment::{CreateEquipment, EquipmentItem};
use toolcrib::models::team::{CreateTeam, Team};
use toolcrib::{AppResult, CoreConfig, CoreState, NoopNotifier};

pub fn engine() -> CoreState {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolcrib=warn".into()),
        )
        .with_test_writer()
        .try_init();

    CoreState::new(CoreConfig::default(), Arc::new(NoopNotifier))
}

pub async fn create_item(state: &CoreState, name: &str, total: i32) -> EquipmentItem {
    state
        .services
        .inventory
        .create_item(CreateEquipment {
            name: name.to_string(),
            location: Some("aisle 4".into()),
            category: None,
            serial_number: None,
            value: None,
            total_quantity: total,
            notes: None,
        })
        .await
        .expect("failed to create equipment")
}

pub fn create_team(state: &CoreState, name: &str) -> Team {
    state
        .services
        .teams
        .create(CreateTeam {
            name: name.to_string(),
        })
        .expect("failed to create team")
}

pub async fn check_out(
    state: &CoreState,
    item: &EquipmentItem,
    team: &Team,
    quantity: i32,
    due_in_hours: i64,
) -> AppResult<CheckoutRecord> {
    state
        .services
        .coordinator
        .check_out(CheckoutRequest {
            equipment_id: item.id,
            team_id: team.id,
            issued_by: 1,
            quantity,
            expected_return_at: Some(chrono::Utc::now() + chrono::Duration::hours(due_in_hours)),
            request_token: None,
        })
        .await
}
