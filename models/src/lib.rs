// models/src/lib.rs

pub mod clinical_action;
pub mod departments;
pub mod errors;
pub mod events;
pub mod patient;

pub use clinical_action::{ClinicalAction, ClinicalActionPatch, NewClinicalAction};
pub use departments::DEPARTMENTS;
pub use errors::{WorkflowError, WorkflowResult};
pub use events::{ClientMessage, ServerEvent};
pub use patient::{NewPatient, Patient};
