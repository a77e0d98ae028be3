// models/src/patient.rs

use serde::{Deserialize, Serialize};

/// An admitted patient. All wire fields are camelCase for compatibility
/// with the existing front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Opaque UUID string, assigned at creation and never changed.
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String, // e.g., "Male", "Female", "Other"
    pub blood_group: String,
    /// Admission date as a plain YYYY-MM-DD string.
    pub admission_date: String,
    /// Free-text diagnosis label.
    pub condition: String,
    pub status: String, // e.g., "admitted", "discharged", "critical"
}

/// Fields accepted when registering a patient. Id, admission date and any
/// omitted optional field are filled in by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: Option<String>,
    pub condition: String,
    pub status: Option<String>,
}
