//! Domain types for the meet ledger

pub mod athlete;
pub mod attempt;
pub mod entry;
pub mod ids;
pub mod modality;
pub mod movement;

pub use athlete::{age_on, AgeDivision, AttributeError, Equipment, Sex};
pub use attempt::{Attempt, AttemptStatus};
pub use entry::{Entry, EntryError, STANDARD_ATTEMPTS, WITH_FOURTH_ATTEMPT};
pub use ids::EntryId;
pub use modality::{resolve_modalities, EventType, Modality, ModalityError, ModalityPolicy};
pub use movement::Movement;
