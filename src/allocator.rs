//! Business-identifier allocation.
//!
//! Patients get a 16-digit numeric `U_id` (the value encoded into the
//! health-card QR code); appointments get a 4-character alphanumeric
//! code. Uniqueness is enforced atomically: each draw is committed via
//! INSERT against a UNIQUE column, and a constraint failure on that
//! column triggers a redraw. Attempts are bounded — after
//! [`MAX_ATTEMPTS`] collisions the operation fails with
//! `AllocationExhausted` instead of looping forever.

use rand::Rng;
use rusqlite::Connection;

use crate::db::repository::{self, Entity};
use crate::db::DatabaseError;

/// Collision redraws before giving up. At 16 digits a single collision
/// is already vanishingly rare; the bound exists so identifier-space
/// exhaustion fails loudly instead of hanging.
pub const MAX_ATTEMPTS: u32 = 5;

const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random 16-digit patient identifier. Leading zeros are allowed: the
/// draw is uniform over the full digit space.
pub fn patient_uid() -> String {
    let mut rng = rand::thread_rng();
    (0..16).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

/// Random 4-character appointment code over `[a-zA-Z0-9]`.
pub fn appointment_code() -> String {
    let mut rng = rand::thread_rng();
    (0..4)
        .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
        .collect()
}

/// Opaque payment-processor token reference (never derived from the
/// card number).
pub fn payment_token() -> String {
    use base64::Engine;
    let bytes: [u8; 16] = rand::random();
    format!(
        "tok_{}",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    )
}

/// Insert an entity whose business identifier must be unique.
///
/// `draw` builds a fresh candidate entity (with a newly drawn
/// identifier) per attempt. A UNIQUE failure on `unique_column`
/// (e.g. `"patients.u_id"`) triggers a redraw; any other error is
/// returned as-is. The insert itself is the uniqueness check, so two
/// concurrent allocations cannot both claim the same identifier.
pub fn insert_unique<T, F>(
    conn: &Connection,
    unique_column: &str,
    mut draw: F,
) -> Result<T, DatabaseError>
where
    T: Entity,
    F: FnMut() -> T,
{
    for _ in 0..MAX_ATTEMPTS {
        let entity = draw();
        match repository::insert(conn, &entity) {
            Ok(()) => return Ok(entity),
            Err(e) if e.is_unique_violation(unique_column) => {
                tracing::debug!(column = unique_column, "identifier collision, redrawing");
                continue;
            }
            Err(e) => return Err(e),
        }
    }
    Err(DatabaseError::AllocationExhausted {
        entity_type: T::NOUN.to_string(),
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::{Appointment, NewAppointment, NewPatient, Patient};

    fn new_patient() -> NewPatient {
        NewPatient {
            first_name: "Amara".into(),
            last_name: "Perera".into(),
            dob: "1990-05-01".into(),
            gender: "Female".into(),
            email: "amara@example.com".into(),
            phone: "0771234567".into(),
            address: "12 Lake Rd".into(),
            insurance_number: "INS-778".into(),
            physician: "Dr. Silva".into(),
            medical_history: "None".into(),
            blood_type: "O+".into(),
            emergency_contact: "0779876543".into(),
        }
    }

    fn new_appointment() -> NewAppointment {
        NewAppointment {
            patient_id: "1234567890123456".into(),
            doctor_id: "doc-1".into(),
            appointment_date: "2026-09-15".into(),
            time: "10:30".into(),
            appointment_reason: "Follow-up".into(),
            location: "Clinic A".into(),
            notes: None,
        }
    }

    #[test]
    fn patient_uid_is_sixteen_digits() {
        for _ in 0..100 {
            let uid = patient_uid();
            assert_eq!(uid.len(), 16);
            assert!(uid.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn appointment_code_is_four_alphanumeric() {
        for _ in 0..100 {
            let code = appointment_code();
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn sequential_uids_differ() {
        assert_ne!(patient_uid(), patient_uid());
    }

    #[test]
    fn insert_unique_succeeds_first_try() {
        let conn = open_memory_database().unwrap();
        let patient =
            insert_unique(&conn, "patients.u_id", || {
                Patient::new(patient_uid(), new_patient())
            })
            .unwrap();
        assert_eq!(patient.u_id.len(), 16);
    }

    #[test]
    fn insert_unique_redraws_on_collision() {
        let conn = open_memory_database().unwrap();
        let taken = Patient::new("1111111111111111".into(), new_patient());
        crate::db::repository::insert(&conn, &taken).unwrap();

        // First draw collides, second succeeds.
        let mut draws = ["1111111111111111", "2222222222222222"].into_iter();
        let patient = insert_unique(&conn, "patients.u_id", || {
            Patient::new(draws.next().unwrap().into(), new_patient())
        })
        .unwrap();
        assert_eq!(patient.u_id, "2222222222222222");
    }

    #[test]
    fn insert_unique_gives_up_after_max_attempts() {
        let conn = open_memory_database().unwrap();
        let taken = Patient::new("1111111111111111".into(), new_patient());
        crate::db::repository::insert(&conn, &taken).unwrap();

        let mut attempts = 0;
        let err = insert_unique(&conn, "patients.u_id", || {
            attempts += 1;
            Patient::new("1111111111111111".into(), new_patient())
        })
        .unwrap_err();

        assert_eq!(attempts, MAX_ATTEMPTS);
        assert!(matches!(err, DatabaseError::AllocationExhausted { .. }));
    }

    #[test]
    fn appointment_codes_allocate_uniquely() {
        let conn = open_memory_database().unwrap();
        let first = insert_unique(&conn, "appointments.appointment_id", || {
            Appointment::new(appointment_code(), new_appointment())
        })
        .unwrap();
        let second = insert_unique(&conn, "appointments.appointment_id", || {
            Appointment::new(appointment_code(), new_appointment())
        })
        .unwrap();
        assert_ne!(first.appointment_id, second.appointment_id);
    }

    #[test]
    fn payment_token_is_opaque_and_unique() {
        let t1 = payment_token();
        let t2 = payment_token();
        assert!(t1.starts_with("tok_"));
        assert_ne!(t1, t2);
    }
}
