//! Modalities: which movements a result is scored on.
//!
//! The vocabulary is fixed: A (squat), S (bench), T (deadlift) and their
//! additive combinations AS, AT, ST, AST. An entry's modality string is
//! either one token or a comma-separated list; each listed token is scored
//! as its own independent result.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use super::movement::Movement;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModalityError {
    #[error("unknown modality token '{token}' in '{raw}'")]
    UnknownToken { token: String, raw: String },
}

/// What to do with a token outside the vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalityPolicy {
    /// Reject the entry.
    #[default]
    Strict,
    /// Score the token as full power (AST) and log a warning.
    FullPower,
}

/// Scoring event type handed to the point-score adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    FullPower,
    SingleLift,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullPower => f.write_str("full power"),
            Self::SingleLift => f.write_str("single lift"),
        }
    }
}

const SQUAT: u8 = 0b001;
const BENCH: u8 = 0b010;
const DEADLIFT: u8 = 0b100;

/// A non-empty subset of movements, always drawn from the vocabulary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Modality(u8);

impl Modality {
    pub const A: Modality = Modality(SQUAT);
    pub const S: Modality = Modality(BENCH);
    pub const T: Modality = Modality(DEADLIFT);
    pub const AS: Modality = Modality(SQUAT | BENCH);
    pub const AT: Modality = Modality(SQUAT | DEADLIFT);
    pub const ST: Modality = Modality(BENCH | DEADLIFT);
    pub const AST: Modality = Modality(SQUAT | BENCH | DEADLIFT);

    /// Vocabulary order, also used for sorting.
    pub const VOCABULARY: [Modality; 7] = [
        Self::A,
        Self::S,
        Self::T,
        Self::AS,
        Self::AT,
        Self::ST,
        Self::AST,
    ];

    /// Exact token lookup (case-insensitive, surrounding whitespace ignored).
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_uppercase();
        Self::VOCABULARY.into_iter().find(|m| m.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self.0 {
            SQUAT => "A",
            BENCH => "S",
            DEADLIFT => "T",
            m if m == SQUAT | BENCH => "AS",
            m if m == SQUAT | DEADLIFT => "AT",
            m if m == BENCH | DEADLIFT => "ST",
            _ => "AST",
        }
    }

    pub fn contains(self, movement: Movement) -> bool {
        self.0 & bit(movement) != 0
    }

    /// Required movements in competition order.
    pub fn movements(self) -> impl Iterator<Item = Movement> {
        Movement::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    pub fn movement_count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_full_power(self) -> bool {
        self == Self::AST
    }

    pub fn event_type(self) -> EventType {
        if self.is_full_power() {
            EventType::FullPower
        } else {
            EventType::SingleLift
        }
    }

    /// Event under which this modality competes for Best Lifter, if any.
    /// Only full power and bench-only results are eligible.
    pub fn best_lifter_event(self) -> Option<EventType> {
        match self {
            Self::AST => Some(EventType::FullPower),
            Self::S => Some(EventType::SingleLift),
            _ => None,
        }
    }

    fn vocabulary_index(self) -> usize {
        Self::VOCABULARY
            .iter()
            .position(|m| *m == self)
            .unwrap_or(Self::VOCABULARY.len())
    }
}

fn bit(movement: Movement) -> u8 {
    match movement {
        Movement::Squat => SQUAT,
        Movement::Bench => BENCH,
        Movement::Deadlift => DEADLIFT,
    }
}

impl Ord for Modality {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vocabulary_index().cmp(&other.vocabulary_index())
    }
}

impl PartialOrd for Modality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modality({})", self.token())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Modality {
    type Err = ModalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| ModalityError::UnknownToken {
            token: s.trim().to_string(),
            raw: s.to_string(),
        })
    }
}

impl TryFrom<String> for Modality {
    type Error = ModalityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Modality> for String {
    fn from(m: Modality) -> Self {
        m.token().to_string()
    }
}

/// Resolve a declared modality string into one or more modalities.
///
/// Blank strings mean full power. Duplicate tokens collapse to the first
/// occurrence. Unknown tokens follow `policy`.
pub fn resolve_modalities(
    raw: &str,
    policy: ModalityPolicy,
) -> Result<Vec<Modality>, ModalityError> {
    if raw.trim().is_empty() {
        return Ok(vec![Modality::AST]);
    }

    let mut resolved = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let modality = match Modality::from_token(token) {
            Some(m) => m,
            None => match policy {
                ModalityPolicy::Strict => {
                    return Err(ModalityError::UnknownToken {
                        token: token.to_string(),
                        raw: raw.to_string(),
                    })
                }
                ModalityPolicy::FullPower => {
                    warn!(token, raw, "unknown modality token, scoring as full power");
                    Modality::AST
                }
            },
        };
        if !resolved.contains(&modality) {
            resolved.push(modality);
        }
    }

    if resolved.is_empty() {
        resolved.push(Modality::AST);
    }
    Ok(resolved)
}
