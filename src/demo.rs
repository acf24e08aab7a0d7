//! Fixed illustrative dataset.
//!
//! When the backend is unreachable, the patients page falls back to
//! these records so the page stays usable in offline or demo mode.
//! Ids carry a `demo-` prefix so they can never collide with server
//! ids.

use crate::models::Patient;

pub fn sample_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "demo-1".into(),
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            date_of_birth: Some("2016-03-12".into()),
            document_number: None,
            diagnosis: Some("Retraso del lenguaje".into()),
            reason_for_consult: "Dificultades para formar oraciones completas".into(),
            general_notes: None,
            is_active: true,
            admission_date: Some("2024-01-15".into()),
            updated_at: None,
        },
        Patient {
            id: "demo-2".into(),
            first_name: "María".into(),
            last_name: "García".into(),
            date_of_birth: Some("2017-06-05".into()),
            document_number: None,
            diagnosis: Some("Trastorno de fluidez".into()),
            reason_for_consult: "Tartamudez al iniciar frases".into(),
            general_notes: None,
            is_active: true,
            admission_date: Some("2024-01-10".into()),
            updated_at: None,
        },
    ]
}
