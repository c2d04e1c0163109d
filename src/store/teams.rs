//! Team store

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, Team},
};

use super::ids::IdGenerator;

#[derive(Clone)]
pub struct TeamStore {
    teams: Arc<RwLock<HashMap<i64, Team>>>,
    ids: IdGenerator,
}

impl TeamStore {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            teams: Arc::new(RwLock::new(HashMap::new())),
            ids,
        }
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, HashMap<i64, Team>>> {
        self.teams
            .read()
            .map_err(|_| AppError::Unavailable("team store poisoned".into()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, HashMap<i64, Team>>> {
        self.teams
            .write()
            .map_err(|_| AppError::Unavailable("team store poisoned".into()))
    }

    /// Create a team
    pub fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        let team = Team {
            id: self.ids.next(),
            name: data.name.clone(),
            active: true,
            blacklisted: false,
            created_at: Utc::now(),
        };
        self.write()?.insert(team.id, team.clone());
        Ok(team)
    }

    /// Get a team by ID
    pub fn get(&self, id: i64) -> AppResult<Team> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("team {} not found", id)))
    }

    /// List all teams
    pub fn list(&self) -> AppResult<Vec<Team>> {
        let map = self.read()?;
        let mut teams: Vec<_> = map.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    /// Flip the blacklisted mirror flag
    pub fn set_blacklisted(&self, id: i64, blacklisted: bool) -> AppResult<Team> {
        let mut map = self.write()?;
        let team = map
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("team {} not found", id)))?;
        team.blacklisted = blacklisted;
        Ok(team.clone())
    }

    /// Activate or deactivate a team
    pub fn set_active(&self, id: i64, active: bool) -> AppResult<Team> {
        let mut map = self.write()?;
        let team = map
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("team {} not found", id)))?;
        team.active = active;
        Ok(team.clone())
    }
}
