use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three competition lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Squat,
    Bench,
    Deadlift,
}

impl Movement {
    /// Competition order.
    pub const ALL: [Movement; 3] = [Movement::Squat, Movement::Bench, Movement::Deadlift];

    /// Letter used in modality tokens: A (agachamento), S (supino), T (terra).
    pub fn code(self) -> char {
        match self {
            Self::Squat => 'A',
            Self::Bench => 'S',
            Self::Deadlift => 'T',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'A' => Some(Self::Squat),
            'S' => Some(Self::Bench),
            'T' => Some(Self::Deadlift),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Bench => "bench",
            Self::Deadlift => "deadlift",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
