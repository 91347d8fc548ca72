use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/* -------------------------
   Backend wire shapes
--------------------------*/

/// Appointment status as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendStatus {
    #[serde(rename = "AGENDADA")]
    Agendada,
    #[serde(rename = "REALIZADA")]
    Realizada,
    #[serde(rename = "CANCELADA")]
    Cancelada,
}

impl BackendStatus {
    pub const ALL: [BackendStatus; 3] = [
        BackendStatus::Agendada,
        BackendStatus::Realizada,
        BackendStatus::Cancelada,
    ];

    pub fn as_token(self) -> &'static str {
        match self {
            BackendStatus::Agendada => "AGENDADA",
            BackendStatus::Realizada => "REALIZADA",
            BackendStatus::Cancelada => "CANCELADA",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_token() == token)
    }
}

/// `{ "id": 7 }` reference to a user or doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: u64,
}

/// Appointment record as stored and returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendAppointment {
    pub id: u64,
    #[serde(rename = "dataHora")]
    pub date_time: String,
    #[serde(rename = "especialidade", default, deserialize_with = "null_as_empty")]
    pub specialty: String,
    #[serde(rename = "usuario")]
    pub patient: IdRef,
    #[serde(rename = "medico")]
    pub doctor: IdRef,
    #[serde(rename = "observacao", default, deserialize_with = "null_as_empty")]
    pub notes: String,
    /// Raw status token. Kept as text so that an unknown or malformed value
    /// reaches the translator (which falls back to "scheduled") instead of
    /// failing the whole response.
    #[serde(default, deserialize_with = "lenient_token")]
    pub status: Option<String>,
}

/// Body of `POST /consultas`. Write-only; the backend answers with a
/// [`BackendAppointment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(rename = "dataHora")]
    pub date_time: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "usuario")]
    pub patient: IdRef,
    #[serde(rename = "medico")]
    pub doctor: IdRef,
    #[serde(rename = "observacao")]
    pub notes: String,
    pub status: BackendStatus,
}

/* -------------------------
   App models
--------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

/// Appointment as the app works with it: split date/time, string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, 24h
    pub time: String,
    pub specialty: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub notes: String,
    pub status: AppointmentStatus,
}

/// Caller-supplied fields for a new appointment, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM without seconds
    pub time: String,
    pub specialty: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub notes: String,
}

/* -------------------------
   User directory
--------------------------*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Doctor { specialty: Option<String> },
    Patient,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Doctor { .. } => "doctor",
            UserRole::Patient => "patient",
            UserRole::Other(role) => role,
        }
    }
}

/// Directory entry. The role is resolved once, at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "UserRecord")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: UserRole,
}

impl User {
    pub fn is_doctor(&self) -> bool {
        matches!(self.role, UserRole::Doctor { .. })
    }
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    image: Option<String>,
    role: String,
    #[serde(default)]
    specialty: Option<String>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        let role = match r.role.as_str() {
            "doctor" => UserRole::Doctor {
                specialty: r.specialty,
            },
            "patient" => UserRole::Patient,
            _ => UserRole::Other(r.role),
        };
        User {
            id: r.id,
            name: r.name,
            email: r.email,
            image: r.image,
            role,
        }
    }
}

/// Read-only projection of a doctor for the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub image: Option<String>,
}

/* -------------------------
   Helpers
--------------------------*/

fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Accepts any JSON value; only strings survive.
fn lenient_token<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(d)? {
        JsonValue::String(s) => Some(s),
        _ => None,
    })
}

/// User ids arrive as numbers from some endpoints and strings from others.
fn id_as_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(d)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected user id as string or number, got {other}"
        ))),
    }
}
