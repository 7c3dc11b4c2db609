//! Serializable meet configuration.
//!
//! A meet is described by one TOML file:
//!
//! ```toml
//! [meet]
//! name = "Copa Sul"
//! date = "2024-08-10"
//! fourth_attempt = false
//! unknown_modality = "strict"
//!
//! [best_lifter]
//! min_athletes = 3
//!
//! [teams]
//! division = "OPEN"
//! point_table = [12, 9, 8, 7, 6, 5, 4, 3, 2, 1]
//! counted_athletes = 5
//! min_teams = 3
//!
//! [[teams.scopes]]
//! equipment = "raw"
//! modality = "AST"
//!
//! [[points]]
//! sex = "M"
//! equipment = "raw"
//! event = "full_power"
//! a = 1199.72839
//! b = 1025.18162
//! c = 0.00921
//!
//! [[records]]
//! sex = "M"
//! division = "OPEN"
//! weight_class = "93"
//! equipment = "raw"
//! movement = "squat"
//! modality = "AST"
//! weight = 250.0
//! ```

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use barra_core::domain::{
    Entry, Equipment, Modality, ModalityPolicy, STANDARD_ATTEMPTS, WITH_FOURTH_ATTEMPT,
};
use barra_core::ranking::{
    PointTable, TeamRules, TeamScope, DEFAULT_COUNTED_ATHLETES, DEFAULT_MIN_ATHLETES,
    DEFAULT_MIN_TEAMS,
};

use crate::points::PointCoefficients;
use crate::records::RecordRow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full configuration for computing one meet's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetConfig {
    pub meet: MeetSection,
    #[serde(default)]
    pub best_lifter: BestLifterSection,
    #[serde(default)]
    pub teams: TeamsSection,
    #[serde(default)]
    pub points: Vec<PointCoefficients>,
    #[serde(default)]
    pub records: Vec<RecordRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetSection {
    pub name: String,
    /// Evaluation date for ages. Normally the first day of the meet.
    pub date: NaiveDate,
    /// Allow a fourth (record) attempt per movement.
    #[serde(default)]
    pub fourth_attempt: bool,
    #[serde(default)]
    pub unknown_modality: ModalityPolicy,
    /// Division token whose records apply to every athlete.
    #[serde(default = "default_open_division")]
    pub open_division: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestLifterSection {
    #[serde(default = "default_min_athletes")]
    pub min_athletes: usize,
}

impl Default for BestLifterSection {
    fn default() -> Self {
        Self { min_athletes: DEFAULT_MIN_ATHLETES }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsSection {
    #[serde(default = "default_open_division")]
    pub division: String,
    #[serde(default)]
    pub point_table: PointTable,
    #[serde(default = "default_counted_athletes")]
    pub counted_athletes: usize,
    #[serde(default = "default_min_teams")]
    pub min_teams: usize,
    #[serde(default)]
    pub scopes: Vec<ScopeSection>,
}

impl Default for TeamsSection {
    fn default() -> Self {
        Self {
            division: default_open_division(),
            point_table: PointTable::default(),
            counted_athletes: DEFAULT_COUNTED_ATHLETES,
            min_teams: DEFAULT_MIN_TEAMS,
            scopes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSection {
    pub equipment: Equipment,
    #[serde(default)]
    pub modality: Option<Modality>,
}

fn default_open_division() -> String {
    "OPEN".to_string()
}

fn default_min_athletes() -> usize {
    DEFAULT_MIN_ATHLETES
}

fn default_counted_athletes() -> usize {
    DEFAULT_COUNTED_ATHLETES
}

fn default_min_teams() -> usize {
    DEFAULT_MIN_TEAMS
}

impl MeetConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meet.name.trim().is_empty() {
            return Err(ConfigError::Invalid("meet.name must not be empty".into()));
        }
        if self.best_lifter.min_athletes == 0 {
            return Err(ConfigError::Invalid("best_lifter.min_athletes must be at least 1".into()));
        }
        if self.teams.point_table.as_slice().is_empty() {
            return Err(ConfigError::Invalid("teams.point_table must not be empty".into()));
        }
        if self.teams.counted_athletes == 0 {
            return Err(ConfigError::Invalid("teams.counted_athletes must be at least 1".into()));
        }
        if self.teams.min_teams == 0 {
            return Err(ConfigError::Invalid("teams.min_teams must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for p in &self.points {
            if !seen.insert((p.sex, p.equipment, p.event)) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate point coefficients for {} {} {}",
                    p.sex, p.equipment, p.event
                )));
            }
            if ![p.a, p.b, p.c].iter().all(|v| v.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "point coefficients for {} {} {} must be finite",
                    p.sex, p.equipment, p.event
                )));
            }
        }

        for r in &self.records {
            if !r.weight.is_finite() || r.weight <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "record {} {} {} {} has weight {}",
                    r.division, r.sex, r.weight_class, r.movement, r.weight
                )));
            }
            if !r.modality.contains(r.movement) {
                return Err(ConfigError::Invalid(format!(
                    "record {} {} {}: {} is not part of modality {}",
                    r.division, r.sex, r.weight_class, r.movement, r.modality
                )));
            }
        }
        Ok(())
    }

    /// Attempts allowed per movement.
    pub fn max_attempts(&self) -> usize {
        if self.meet.fourth_attempt {
            WITH_FOURTH_ATTEMPT
        } else {
            STANDARD_ATTEMPTS
        }
    }

    pub fn team_rules(&self) -> TeamRules {
        TeamRules {
            point_table: self.teams.point_table.clone(),
            counted_athletes: self.teams.counted_athletes,
            min_teams: self.teams.min_teams,
        }
    }

    /// Team scopes to score. Without configured scopes, one unfiltered scope
    /// per equipment present in the snapshot.
    pub fn team_scopes(&self, entries: &[Entry]) -> Vec<TeamScope> {
        if !self.teams.scopes.is_empty() {
            return self
                .teams
                .scopes
                .iter()
                .map(|s| TeamScope {
                    division: self.teams.division.clone(),
                    equipment: s.equipment,
                    modality: s.modality,
                })
                .collect();
        }

        let equipment: BTreeSet<Equipment> = entries.iter().map(|e| e.equipment).collect();
        equipment
            .into_iter()
            .map(|equipment| TeamScope {
                division: self.teams.division.clone(),
                equipment,
                modality: None,
            })
            .collect()
    }
}
