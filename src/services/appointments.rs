// src/services/appointments.rs

use std::sync::Arc;

use crate::error::{RemoteError, ServiceError};
use crate::messages;
use crate::models::{Appointment, CreateAppointmentRequest};
use crate::services::AppointmentsApi;
use crate::translator;

/// Appointment operations in app terms: frontend shapes in and out, one
/// fixed message per failed operation.
#[derive(Clone)]
pub struct AppointmentsService {
    api: Arc<dyn AppointmentsApi>,
}

impl AppointmentsService {
    pub fn new(api: Arc<dyn AppointmentsApi>) -> Self {
        Self { api }
    }

    /// Every appointment the backend knows about; callers filter.
    pub async fn get_all_appointments(&self) -> Result<Vec<Appointment>, ServiceError> {
        let rows = self
            .api
            .list()
            .await
            .map_err(|e| remote(messages::LIST_APPOINTMENTS_FAILED, e))?;

        rows.iter()
            .map(|r| translator::to_frontend(r).map_err(ServiceError::from))
            .collect()
    }

    pub async fn create_appointment(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<Appointment, ServiceError> {
        let created = self
            .api
            .create(req)
            .await
            .map_err(|e| remote(messages::CREATE_APPOINTMENT_FAILED, e))?;

        tracing::info!(
            appointment_id = created.id,
            patient_id = req.patient.id,
            doctor_id = req.doctor.id,
            "appointment created"
        );
        Ok(translator::to_frontend(&created)?)
    }

    pub async fn get_appointment_by_id(&self, id: &str) -> Result<Appointment, ServiceError> {
        let id = translator::parse_id("appointment", id)?;
        let row = self
            .api
            .get_by_id(id)
            .await
            .map_err(|e| remote(messages::GET_APPOINTMENT_FAILED, e))?;
        Ok(translator::to_frontend(&row)?)
    }

    pub async fn cancel_appointment(&self, id: &str) -> Result<(), ServiceError> {
        let id = translator::parse_id("appointment", id)?;
        self.api
            .cancel(id)
            .await
            .map_err(|e| remote(messages::CANCEL_APPOINTMENT_FAILED, e))?;

        tracing::info!(appointment_id = id, "appointment cancelled");
        Ok(())
    }
}

fn remote(message: &'static str, e: RemoteError) -> ServiceError {
    tracing::error!(error = %e, "{message}");
    ServiceError::remote(message, e)
}
