// store/src/seed.rs
//
// Fixed sample data the server boots with. There is no durable state, so
// every restart comes back to exactly this.

use chrono::Utc;
use uuid::Uuid;

use models::{ClinicalAction, Patient};

use crate::RecordStore;

pub(crate) fn seeded_store() -> RecordStore {
    let patients = vec![
        Patient {
            id: Uuid::new_v4().to_string(),
            name: "John Smith".to_string(),
            age: 45,
            gender: "Male".to_string(),
            blood_group: "O+".to_string(),
            admission_date: "2024-01-15".to_string(),
            condition: "Chest Pain".to_string(),
            status: "admitted".to_string(),
        },
        Patient {
            id: Uuid::new_v4().to_string(),
            name: "Sarah Johnson".to_string(),
            age: 32,
            gender: "Female".to_string(),
            blood_group: "A+".to_string(),
            admission_date: "2024-01-16".to_string(),
            condition: "Fractured Leg".to_string(),
            status: "admitted".to_string(),
        },
        Patient {
            id: Uuid::new_v4().to_string(),
            name: "Michael Chen".to_string(),
            age: 58,
            gender: "Male".to_string(),
            blood_group: "B+".to_string(),
            admission_date: "2024-01-14".to_string(),
            condition: "Diabetes Management".to_string(),
            status: "admitted".to_string(),
        },
    ];

    let now = Utc::now();
    let actions = vec![
        ClinicalAction {
            id: Uuid::new_v4().to_string(),
            patient_id: patients[0].id.clone(),
            action_type: "prescription".to_string(),
            title: "Pain Medication".to_string(),
            description: "Prescribe ibuprofen 400mg every 6 hours for chest pain".to_string(),
            initiated_by: "Dr. Wilson".to_string(),
            initiated_by_department: "Doctor".to_string(),
            assigned_to: "Pharmacy".to_string(),
            priority: "medium".to_string(),
            status: "pending".to_string(),
            created_at: now,
            updated_at: now,
        },
        ClinicalAction {
            id: Uuid::new_v4().to_string(),
            patient_id: patients[1].id.clone(),
            action_type: "diagnostic".to_string(),
            title: "X-Ray Imaging".to_string(),
            description: "Perform leg X-ray to assess fracture severity".to_string(),
            initiated_by: "Dr. Brown".to_string(),
            initiated_by_department: "Doctor".to_string(),
            assigned_to: "Radiology".to_string(),
            priority: "high".to_string(),
            status: "in-progress".to_string(),
            created_at: now,
            updated_at: now,
        },
    ];

    RecordStore { patients, actions }
}
