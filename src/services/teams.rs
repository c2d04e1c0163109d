//! Team administration service

use validator::Validate;

use crate::{
    error::AppResult,
    models::team::{CreateTeam, Team},
    store::Store,
};

#[derive(Clone)]
pub struct TeamService {
    store: Store,
}

impl TeamService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a team
    pub fn create(&self, data: CreateTeam) -> AppResult<Team> {
        data.validate()?;
        let team = self.store.teams.create(&data)?;
        tracing::info!(team_id = team.id, name = %team.name, "team created");
        Ok(team)
    }

    /// Get a team by ID
    pub fn get(&self, id: i64) -> AppResult<Team> {
        self.store.teams.get(id)
    }

    /// List all teams
    pub fn list(&self) -> AppResult<Vec<Team>> {
        self.store.teams.list()
    }

    /// Activate or deactivate a team
    pub fn set_active(&self, id: i64, active: bool) -> AppResult<Team> {
        self.store.teams.set_active(id, active)
    }
}
