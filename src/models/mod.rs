pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod patient;
pub mod payment;
pub mod product;
pub mod service;

pub use appointment::{Appointment, AppointmentChanges, NewAppointment};
pub use doctor::{Doctor, DoctorChanges, NewDoctor};
pub use enums::{AppointmentStatus, PaymentStatus};
pub use patient::{NewPatient, Patient, PatientChanges};
pub use payment::{NewPayment, Payment};
pub use product::{NewProduct, Product, ProductChanges};
pub use service::{NewService, Service, ServiceChanges};

use chrono::{DateTime, Utc};

/// Lenient RFC 3339 parse for timestamps read back from the store.
pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}
