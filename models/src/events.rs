// models/src/events.rs

use serde::{Deserialize, Serialize};

use crate::{ClinicalAction, Patient};

/// Live-channel event pushed to every connected session after a
/// successful mutation, carrying the full resulting record.
///
/// Wire shape: `{"event": "clinicalActionCreated", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    ClinicalActionCreated(ClinicalAction),
    ClinicalActionUpdated(ClinicalAction),
    PatientCreated(Patient),
}

/// Message a client may send over the live channel.
///
/// Wire shape: `{"event": "joinPatientRoom", "patientId": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinPatientRoom { patient_id: String },
    #[serde(rename_all = "camelCase")]
    LeavePatientRoom { patient_id: String },
}
