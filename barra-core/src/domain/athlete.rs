//! Athlete attributes used for grouping: sex, equipment, age division.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("unknown sex '{0}' (expected M or F)")]
    UnknownSex(String),
    #[error("unknown equipment '{0}' (expected raw or equipped)")]
    UnknownEquipment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M", alias = "m", alias = "male")]
    Male,
    #[serde(rename = "F", alias = "f", alias = "female")]
    Female,
}

impl Sex {
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            _ => Err(AttributeError::UnknownSex(s.to_string())),
        }
    }
}

/// Equipment category. "Classic" is the federation's name for raw lifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    #[serde(alias = "classic", alias = "classico")]
    Raw,
    #[serde(alias = "equipado")]
    Equipped,
}

impl Equipment {
    pub fn label(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Equipped => "equipped",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Equipment {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "classic" | "classico" => Ok(Self::Raw),
            "equipped" | "equipado" => Ok(Self::Equipped),
            _ => Err(AttributeError::UnknownEquipment(s.to_string())),
        }
    }
}

/// Age ladder used for Best Lifter grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeDivision {
    SubJunior,
    Junior,
    Open,
    MasterI,
    MasterII,
    MasterIII,
    MasterIV,
}

impl AgeDivision {
    /// Bucket for an age in whole years.
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=18 => Self::SubJunior,
            19..=23 => Self::Junior,
            24..=39 => Self::Open,
            40..=49 => Self::MasterI,
            50..=59 => Self::MasterII,
            60..=69 => Self::MasterIII,
            _ => Self::MasterIV,
        }
    }

    /// Bucket for a birth date evaluated on `as_of`. Unknown birth date is Open.
    pub fn from_birth_date(birth_date: Option<NaiveDate>, as_of: NaiveDate) -> Self {
        birth_date
            .map(|b| Self::from_age(age_on(b, as_of)))
            .unwrap_or(Self::Open)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SubJunior => "Sub-Junior",
            Self::Junior => "Junior",
            Self::Open => "Open",
            Self::MasterI => "Master I",
            Self::MasterII => "Master II",
            Self::MasterIII => "Master III",
            Self::MasterIV => "Master IV",
        }
    }
}

impl fmt::Display for AgeDivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Age in whole years on `as_of`. A birthday later in the year has not
/// happened yet. Birth dates after `as_of` give 0.
pub fn age_on(birth_date: NaiveDate, as_of: NaiveDate) -> u32 {
    let mut years = as_of.year() - birth_date.year();
    if (as_of.month(), as_of.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
