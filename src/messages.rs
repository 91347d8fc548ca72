//! Fixed user-facing strings. The backend speaks Portuguese, so these do too.

pub const FILL_ALL_FIELDS: &str = "Por favor, preencha todos os campos.";
pub const INVALID_DATE_FORMAT: &str = "Formato de data inválido. Use DD/MM/AAAA.";
pub const LOAD_DOCTORS_FAILED: &str = "Erro ao carregar médicos. Tente novamente.";
pub const SCHEDULE_FAILED: &str = "Erro ao agendar consulta. Tente novamente mais tarde.";
pub const SCHEDULED_OK: &str = "Consulta agendada com sucesso!";

// per-operation service failures
pub const LIST_APPOINTMENTS_FAILED: &str = "Erro ao carregar consultas";
pub const CREATE_APPOINTMENT_FAILED: &str = "Erro ao agendar consulta";
pub const GET_APPOINTMENT_FAILED: &str = "Erro ao carregar consulta";
pub const CANCEL_APPOINTMENT_FAILED: &str = "Erro ao cancelar consulta";

/// Notes attached to a new appointment when the patient wrote none.
pub fn default_notes(specialty: &str) -> String {
    format!("Consulta para {specialty}")
}
