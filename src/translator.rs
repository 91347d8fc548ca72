//! Stateless mapping between the backend's appointment shape and the app's.
//!
//! Timezone policy: a timestamp carrying an explicit offset (`Z`, `-03:00`)
//! is converted to UTC before being split; a timestamp without one is taken
//! as UTC wall-clock time and split as written. The host's local zone is
//! never consulted.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::MappingError;
use crate::models::{
    Appointment, AppointmentDraft, AppointmentStatus, BackendAppointment, BackendStatus,
    CreateAppointmentRequest, Doctor, IdRef, User, UserRole,
};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Specialty shown for doctors whose record carries none.
pub const UNKNOWN_SPECIALTY: &str = "N/A";

pub fn to_frontend(appt: &BackendAppointment) -> Result<Appointment, MappingError> {
    let ts = parse_timestamp(&appt.date_time)?;

    Ok(Appointment {
        id: appt.id.to_string(),
        date: ts.format("%Y-%m-%d").to_string(),
        time: ts.format("%H:%M").to_string(),
        specialty: appt.specialty.clone(),
        patient_id: appt.patient.id.to_string(),
        doctor_id: appt.doctor.id.to_string(),
        notes: appt.notes.clone(),
        status: status_from_backend(appt.status.as_deref()),
    })
}

/// Builds the creation payload. `draft.time` must be `HH:MM`; seconds are
/// always appended as `:00`.
pub fn to_backend_create_request(
    draft: &AppointmentDraft,
) -> Result<CreateAppointmentRequest, MappingError> {
    Ok(CreateAppointmentRequest {
        date_time: format!("{}T{}:00", draft.date, draft.time),
        specialty: draft.specialty.clone(),
        patient: IdRef {
            id: parse_id("patient", &draft.patient_id)?,
        },
        doctor: IdRef {
            id: parse_id("doctor", &draft.doctor_id)?,
        },
        notes: draft.notes.clone(),
        status: BackendStatus::Agendada,
    })
}

/// Unknown or missing tokens fall back to `Scheduled`. The fallback is logged
/// so backend contract drift does not go unnoticed.
pub fn status_from_backend(token: Option<&str>) -> AppointmentStatus {
    match token.and_then(BackendStatus::from_token) {
        Some(BackendStatus::Agendada) => AppointmentStatus::Scheduled,
        Some(BackendStatus::Realizada) => AppointmentStatus::Completed,
        Some(BackendStatus::Cancelada) => AppointmentStatus::Cancelled,
        None => {
            tracing::warn!(
                token = token.unwrap_or("<missing>"),
                "unrecognized appointment status, falling back to scheduled"
            );
            AppointmentStatus::Scheduled
        }
    }
}

pub fn status_to_backend(status: AppointmentStatus) -> BackendStatus {
    match status {
        AppointmentStatus::Scheduled => BackendStatus::Agendada,
        AppointmentStatus::Completed => BackendStatus::Realizada,
        AppointmentStatus::Cancelled => BackendStatus::Cancelada,
    }
}

/// Decimal, unsigned, no surrounding whitespace.
pub fn parse_id(field: &'static str, value: &str) -> Result<u64, MappingError> {
    let invalid = || MappingError::InvalidId {
        field,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u64>().map_err(|_| invalid())
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, MappingError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| MappingError::InvalidTimestamp(raw.to_string()))
}

/// Keeps the doctors from a directory listing, in order.
pub fn doctors_from_users(users: &[User]) -> Vec<Doctor> {
    users
        .iter()
        .filter_map(|u| match &u.role {
            UserRole::Doctor { specialty } => Some(Doctor {
                id: u.id.clone(),
                name: u.name.clone(),
                specialty: specialty
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SPECIALTY.to_string()),
                image: u.image.clone(),
            }),
            _ => None,
        })
        .collect()
}
