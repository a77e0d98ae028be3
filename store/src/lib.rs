// store/src/lib.rs

mod seed;

use chrono::Utc;
use uuid::Uuid;

use models::{
    ClinicalAction, ClinicalActionPatch, NewClinicalAction, NewPatient, Patient, WorkflowError,
    WorkflowResult,
};

/// Process-lifetime in-memory holder of the patient and clinical-action
/// collections. Owned by the server and injected into request handlers;
/// never a process global. Collections are linearly scanned, which is fine
/// at this scale.
#[derive(Debug, Default)]
pub struct RecordStore {
    patients: Vec<Patient>,
    actions: Vec<ClinicalAction>,
}

impl RecordStore {
    /// An empty store, mainly for tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store initialized with the fixed sample data the server boots
    /// with. Everything resets to this on restart.
    pub fn seeded() -> Self {
        seed::seeded_store()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Registers a patient. Assigns a fresh UUID, stamps today's date as
    /// the admission date, and fills the optional fields with their
    /// admission defaults when the caller omits them.
    pub fn create_patient(&mut self, fields: NewPatient) -> Patient {
        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            age: fields.age,
            gender: fields.gender,
            blood_group: fields.blood_group.unwrap_or_else(|| "O+".to_string()),
            admission_date: Utc::now().format("%Y-%m-%d").to_string(),
            condition: fields.condition,
            status: fields.status.unwrap_or_else(|| "admitted".to_string()),
        };
        self.patients.push(patient.clone());
        patient
    }

    pub fn actions(&self) -> &[ClinicalAction] {
        &self.actions
    }

    pub fn action(&self, id: &str) -> Option<&ClinicalAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// All actions belonging to one patient, in insertion order. An
    /// unknown patient id yields an empty list, not an error.
    pub fn actions_for_patient(&self, patient_id: &str) -> Vec<ClinicalAction> {
        self.actions
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    /// Creates a clinical action. New actions always start out `pending`
    /// with `created_at == updated_at`.
    pub fn create_action(&mut self, fields: NewClinicalAction) -> ClinicalAction {
        let now = Utc::now();
        let action = ClinicalAction {
            id: Uuid::new_v4().to_string(),
            patient_id: fields.patient_id,
            action_type: fields.action_type,
            title: fields.title,
            description: fields.description,
            initiated_by: fields.initiated_by.unwrap_or_else(|| "Dr. Wilson".to_string()),
            initiated_by_department: fields
                .initiated_by_department
                .unwrap_or_else(|| "Doctor".to_string()),
            assigned_to: fields.assigned_to.unwrap_or_else(|| "Pharmacy".to_string()),
            priority: fields.priority.unwrap_or_else(|| "medium".to_string()),
            status: "pending".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.actions.push(action.clone());
        action
    }

    /// Shallow-merges `patch` onto the stored action and forces
    /// `updated_at` to the current time. `created_at` is never touched.
    /// Fails with `ActionNotFound` (leaving the collection unchanged) if
    /// the id is unknown.
    pub fn update_action(
        &mut self,
        id: &str,
        patch: ClinicalActionPatch,
    ) -> WorkflowResult<ClinicalAction> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(WorkflowError::ActionNotFound)?;

        patch.merge_into(action);
        action.updated_at = Utc::now();
        Ok(action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use models::{ClinicalActionPatch, NewClinicalAction, NewPatient, WorkflowError};

    fn new_action(patient_id: &str, title: &str) -> NewClinicalAction {
        NewClinicalAction {
            patient_id: patient_id.to_string(),
            action_type: "prescription".to_string(),
            title: title.to_string(),
            description: "Prescribe ibuprofen 400mg every 6 hours".to_string(),
            initiated_by: Some("Dr. Wilson".to_string()),
            initiated_by_department: Some("Doctor".to_string()),
            assigned_to: Some("Pharmacy".to_string()),
            priority: Some("medium".to_string()),
        }
    }

    #[test]
    fn should_create_action_as_pending_with_equal_timestamps() {
        let mut store = RecordStore::new();
        let action = store.create_action(new_action("P1", "Pain Medication"));

        assert_eq!(action.status, "pending");
        assert_eq!(action.created_at, action.updated_at);
        assert_eq!(store.actions().len(), 1);
    }

    #[test]
    fn should_fill_action_defaults_when_optional_fields_are_omitted() {
        let mut store = RecordStore::new();
        let action = store.create_action(NewClinicalAction {
            patient_id: "P1".to_string(),
            action_type: "lab-test".to_string(),
            title: "CBC Panel".to_string(),
            description: "Complete blood count".to_string(),
            initiated_by: None,
            initiated_by_department: None,
            assigned_to: None,
            priority: None,
        });

        assert_eq!(action.initiated_by, "Dr. Wilson");
        assert_eq!(action.initiated_by_department, "Doctor");
        assert_eq!(action.assigned_to, "Pharmacy");
        assert_eq!(action.priority, "medium");
    }

    #[test]
    fn should_assign_unique_ids() {
        let mut store = RecordStore::new();
        let a = store.create_action(new_action("P1", "First"));
        let b = store.create_action(new_action("P1", "Second"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn should_merge_patch_and_preserve_created_at() {
        let mut store = RecordStore::new();
        let created = store.create_action(new_action("P1", "Pain Medication"));

        let updated = store
            .update_action(
                &created.id,
                ClinicalActionPatch {
                    status: Some("in-progress".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, "in-progress");
        assert_eq!(updated.title, "Pain Medication");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn should_allow_any_status_overwrite() {
        // No transition rules exist, even away from "completed".
        let mut store = RecordStore::new();
        let created = store.create_action(new_action("P1", "Pain Medication"));

        for status in ["completed", "pending", "cancelled"] {
            let updated = store
                .update_action(
                    &created.id,
                    ClinicalActionPatch {
                        status: Some(status.to_string()),
                        ..Default::default()
                    },
                )
                .unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[test]
    fn should_fail_update_for_unknown_id_and_leave_collection_unchanged() {
        let mut store = RecordStore::seeded();
        let before: Vec<_> = store.actions().to_vec();

        let result = store.update_action(
            "doesnotexist",
            ClinicalActionPatch {
                status: Some("cancelled".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(result.unwrap_err(), WorkflowError::ActionNotFound);
        assert_eq!(store.actions(), before.as_slice());
    }

    #[test]
    fn should_filter_actions_by_patient_in_insertion_order() {
        let mut store = RecordStore::new();
        let a = store.create_action(new_action("P1", "First"));
        store.create_action(new_action("P2", "Other"));
        let b = store.create_action(new_action("P1", "Second"));

        let filtered = store.actions_for_patient("P1");
        assert_eq!(
            filtered.iter().map(|x| x.id.as_str()).collect::<Vec<_>>(),
            vec![a.id.as_str(), b.id.as_str()]
        );

        assert!(store.actions_for_patient("nobody").is_empty());
    }

    #[test]
    fn should_fill_patient_defaults_and_stamp_admission_date() {
        let mut store = RecordStore::new();
        let patient = store.create_patient(NewPatient {
            name: "Jane Doe".to_string(),
            age: 29,
            gender: "Female".to_string(),
            blood_group: None,
            condition: "Migraine".to_string(),
            status: None,
        });

        assert_eq!(patient.blood_group, "O+");
        assert_eq!(patient.status, "admitted");
        assert_eq!(patient.admission_date.len(), "2024-01-15".len());
        assert_eq!(store.patient(&patient.id), Some(&patient));
    }

    #[test]
    fn should_seed_fixed_sample_data() {
        let store = RecordStore::seeded();
        assert_eq!(store.patients().len(), 3);
        assert_eq!(store.actions().len(), 2);

        let first_patient = &store.patients()[0];
        assert_eq!(first_patient.name, "John Smith");

        // Seeded actions reference seeded patients.
        for action in store.actions() {
            assert!(store.patient(&action.patient_id).is_some());
        }
        assert_eq!(store.actions()[0].status, "pending");
        assert_eq!(store.actions()[1].status, "in-progress");
    }
}
