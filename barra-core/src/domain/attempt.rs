//! Attempt ledger cells.
//!
//! An attempt is a declared weight plus an outcome. The ledger uses exactly
//! one representation (status enum + unsigned weight). Older tooling encodes
//! a failed attempt as a negative weight with no separate status; that form is
//! accepted only through [`Attempt::from_signed`] and the snapshot
//! deserializer, and never travels further into the engine.

use serde::{Deserialize, Serialize};

/// Outcome of a single attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Declared (or not yet declared) and not yet judged.
    #[default]
    Pending,
    GoodLift,
    NoLift,
    /// The athlete passed on the attempt.
    NoAttempt,
}

/// One attempt at a movement.
///
/// A weight of zero or `None` means "not attempted", whatever the status says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AttemptRepr")]
pub struct Attempt {
    pub weight: Option<f64>,
    pub status: AttemptStatus,
}

impl Attempt {
    pub fn new(weight: f64, status: AttemptStatus) -> Self {
        Self { weight: Some(weight), status }
    }

    pub fn good(weight: f64) -> Self {
        Self::new(weight, AttemptStatus::GoodLift)
    }

    pub fn failed(weight: f64) -> Self {
        Self::new(weight, AttemptStatus::NoLift)
    }

    pub fn pending(weight: f64) -> Self {
        Self::new(weight, AttemptStatus::Pending)
    }

    pub fn passed(weight: f64) -> Self {
        Self::new(weight, AttemptStatus::NoAttempt)
    }

    /// An attempt slot with nothing declared.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declared weight, with zero treated as absent.
    pub fn declared_weight(&self) -> Option<f64> {
        self.weight.filter(|w| *w > 0.0)
    }

    /// Weight that counts toward the movement's best, if any.
    pub fn good_weight(&self) -> Option<f64> {
        match self.status {
            AttemptStatus::GoodLift => self.declared_weight(),
            _ => None,
        }
    }

    pub fn is_good_lift(&self) -> bool {
        self.good_weight().is_some()
    }

    /// Translate from the sign-encoded form.
    ///
    /// Positive = good lift, negative = no lift at `|weight|`, zero or `None` =
    /// nothing attempted.
    pub fn from_signed(weight: Option<f64>) -> Self {
        match weight {
            Some(w) if w > 0.0 => Self::good(w),
            Some(w) if w < 0.0 => Self::failed(-w),
            _ => Self::empty(),
        }
    }

    /// Translate to the sign-encoded form.
    ///
    /// Lossy: pending and passed attempts have no signed encoding and come
    /// back as `None`.
    pub fn to_signed(&self) -> Option<f64> {
        let weight = self.declared_weight()?;
        match self.status {
            AttemptStatus::GoodLift => Some(weight),
            AttemptStatus::NoLift => Some(-weight),
            AttemptStatus::Pending | AttemptStatus::NoAttempt => None,
        }
    }
}

/// Wire forms accepted for an attempt: a structured object or a bare
/// (possibly signed, possibly null) number.
#[derive(Deserialize)]
#[serde(untagged)]
enum AttemptRepr {
    Signed(Option<f64>),
    Structured {
        #[serde(default)]
        weight: Option<f64>,
        #[serde(default)]
        status: AttemptStatus,
    },
}

impl From<AttemptRepr> for Attempt {
    fn from(repr: AttemptRepr) -> Self {
        match repr {
            AttemptRepr::Signed(weight) => Attempt::from_signed(weight),
            AttemptRepr::Structured { weight, status } => Attempt { weight, status },
        }
    }
}
