//! Deterministic domain record builders.
//!
//! Builders take explicit ids and indices instead of drawing randomness,
//! so generated fixtures are stable across runs.

use chrono::{DateTime, TimeZone, Utc};
use labstore_market::model::{
    Complaint, ComplaintPriority, ComplaintStatus, Identity, Offer, Order, OrderLocation,
    OrderStatus, PatientAccount, Test, User, UserRole,
};

/// A fixed reference time for generated records.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

/// Builds a catalog test with index-derived fields.
#[must_use]
pub fn make_test(index: usize) -> Test {
    Test {
        id: format!("test_{index:03}"),
        name: format!("Analyse {index}"),
        description: format!("Analyse générée numéro {index}"),
        category: (if index % 2 == 0 { "Biochimie" } else { "Hématologie" }).into(),
        price: 50.0 + index as f64 * 10.0,
        duration: "24h".into(),
        preparation: None,
        image_url: None,
        requires_prescription: None,
    }
}

/// Builds a patient account with index-derived fields.
#[must_use]
pub fn make_patient(index: usize) -> User {
    User::Patient(PatientAccount {
        identity: Identity {
            id: format!("patient_{index:03}"),
            email: format!("patient{index}@example.com"),
            name: format!("Patient {index}"),
            phone: None,
            address: None,
            created_at: fixed_time(),
        },
        date_of_birth: None,
        gender: None,
        blood_type: None,
        allergies: None,
        medical_history: None,
    })
}

/// Builds a pending order for the given patient.
#[must_use]
pub fn make_order(index: usize, patient_id: &str) -> Order {
    Order {
        id: format!("ord_{index:03}"),
        patient_id: patient_id.into(),
        patient_name: format!("Patient {patient_id}"),
        tests: vec![make_test(index)],
        pack: None,
        status: OrderStatus::Pending,
        location: OrderLocation::Home,
        address: Some("1 Rue Exemple".into()),
        scheduled_date: None,
        scheduled_time: None,
        assigned_laboratory: None,
        assigned_nurse: None,
        price: make_test(index).price,
        paid: false,
        created_at: fixed_time(),
        results_url: None,
        prescription_url: None,
        confirmed_by_lab: None,
        confirmed_at: None,
    }
}

/// Builds an offer for the given laboratory.
#[must_use]
pub fn make_offer(index: usize, lab_id: &str) -> Offer {
    Offer {
        id: format!("off_{index:03}"),
        lab_id: lab_id.into(),
        title: format!("Offre {index}"),
        description: "Offre générée".into(),
        price: 100.0 + index as f64 * 5.0,
        image_url: None,
        active: true,
        requires_admin_approval: None,
        approved: None,
        created_at: fixed_time(),
    }
}

/// Builds an open complaint from the given reporter.
#[must_use]
pub fn make_complaint(index: usize, user_id: &str) -> Complaint {
    Complaint {
        id: format!("comp_{index:03}"),
        user_id: user_id.into(),
        user_name: format!("Reporter {user_id}"),
        user_role: UserRole::Patient,
        order_id: None,
        subject: format!("Réclamation {index}"),
        description: "Réclamation générée".into(),
        status: ComplaintStatus::Open,
        priority: ComplaintPriority::Medium,
        assigned_agent_id: None,
        assigned_agent_name: None,
        created_at: fixed_time(),
        updated_at: fixed_time(),
        messages: vec![],
        internal_notes: vec![],
        compensation: None,
    }
}
