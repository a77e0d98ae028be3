// models/src/clinical_action.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An orderable clinical task (prescription, referral, lab test, ...)
/// tracked from creation to a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalAction {
    /// Opaque UUID string, assigned at creation and never changed.
    pub id: String,
    /// Links to a Patient; existence is not enforced.
    pub patient_id: String,
    #[serde(rename = "type")]
    pub action_type: String, // e.g., "prescription", "diagnostic", "referral", "care-instruction", "lab-test", "imaging"
    pub title: String,
    pub description: String,
    pub initiated_by: String,
    pub initiated_by_department: String,
    pub assigned_to: String,
    pub priority: String, // e.g., "low", "medium", "high"
    pub status: String,   // e.g., "pending", "in-progress", "completed", "cancelled"
    /// Set once at creation, never changed afterwards.
    pub created_at: DateTime<Utc>,
    /// Forced to the current time on every mutation; always >= `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a clinical action. Id, status and both
/// timestamps are always assigned by the store; the optional free-text
/// fields fall back to store defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClinicalAction {
    pub patient_id: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub title: String,
    pub description: String,
    pub initiated_by: Option<String>,
    pub initiated_by_department: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
}

/// Partial update for a clinical action. Present fields overwrite the
/// stored value; absent fields are left untouched. Id and `created_at`
/// can never be patched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalActionPatch {
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub initiated_by: Option<String>,
    pub initiated_by_department: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl ClinicalActionPatch {
    /// Shallow merge onto an existing action. Timestamps are the store's
    /// responsibility and are not touched here.
    pub fn merge_into(&self, action: &mut ClinicalAction) {
        if let Some(ref val) = self.patient_id {
            action.patient_id = val.clone();
        }
        if let Some(ref val) = self.action_type {
            action.action_type = val.clone();
        }
        if let Some(ref val) = self.title {
            action.title = val.clone();
        }
        if let Some(ref val) = self.description {
            action.description = val.clone();
        }
        if let Some(ref val) = self.initiated_by {
            action.initiated_by = val.clone();
        }
        if let Some(ref val) = self.initiated_by_department {
            action.initiated_by_department = val.clone();
        }
        if let Some(ref val) = self.assigned_to {
            action.assigned_to = val.clone();
        }
        if let Some(ref val) = self.priority {
            action.priority = val.clone();
        }
        if let Some(ref val) = self.status {
            action.status = val.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClinicalAction, ClinicalActionPatch};
    use chrono::Utc;

    fn sample_action() -> ClinicalAction {
        ClinicalAction {
            id: "a-1".to_string(),
            patient_id: "p-1".to_string(),
            action_type: "prescription".to_string(),
            title: "Pain Medication".to_string(),
            description: "Prescribe ibuprofen 400mg every 6 hours".to_string(),
            initiated_by: "Dr. Wilson".to_string(),
            initiated_by_department: "Doctor".to_string(),
            assigned_to: "Pharmacy".to_string(),
            priority: "medium".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_serialize_action_with_wire_field_names() {
        let value = serde_json::to_value(sample_action()).unwrap();
        assert_eq!(value["patientId"], "p-1");
        assert_eq!(value["type"], "prescription");
        assert_eq!(value["initiatedByDepartment"], "Doctor");
        assert!(value["createdAt"].is_string());
        assert!(value["updatedAt"].is_string());
    }

    #[test]
    fn should_merge_only_present_patch_fields() {
        let mut action = sample_action();
        let patch: ClinicalActionPatch =
            serde_json::from_str(r#"{"status": "in-progress"}"#).unwrap();

        patch.merge_into(&mut action);

        assert_eq!(action.status, "in-progress");
        assert_eq!(action.title, "Pain Medication");
        assert_eq!(action.assigned_to, "Pharmacy");
    }

    #[test]
    fn should_parse_patch_with_renamed_type_field() {
        let patch: ClinicalActionPatch =
            serde_json::from_str(r#"{"type": "lab-test", "priority": "high"}"#).unwrap();
        assert_eq!(patch.action_type.as_deref(), Some("lab-test"));
        assert_eq!(patch.priority.as_deref(), Some("high"));
        assert!(patch.status.is_none());
    }
}
