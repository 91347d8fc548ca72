// src/workflow/patient_appointments.rs

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{MappingError, ServiceError};
use crate::models::Appointment;
use crate::services::{AppointmentsApi, AppointmentsService};
use crate::session::Actor;
use crate::workflow::BusyGuard;

#[derive(Debug, Clone, PartialEq)]
pub struct PatientAppointmentsState {
    pub appointments: Vec<Appointment>,
    pub loading: bool,
}

/// The patient dashboard's appointment list.
pub struct PatientAppointments {
    service: AppointmentsService,
    actor: Option<Actor>,
    state: watch::Sender<PatientAppointmentsState>,
}

fn loading(s: &mut PatientAppointmentsState) -> &mut bool {
    &mut s.loading
}

impl PatientAppointments {
    pub fn new(appointments: Arc<dyn AppointmentsApi>, actor: Option<Actor>) -> Self {
        let (state, _) = watch::channel(PatientAppointmentsState {
            appointments: Vec::new(),
            loading: true,
        });
        Self {
            service: AppointmentsService::new(appointments),
            actor,
            state,
        }
    }

    pub fn state(&self) -> PatientAppointmentsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PatientAppointmentsState> {
        self.state.subscribe()
    }

    /// Fetches every appointment and keeps the actor's own.
    ///
    /// Without an actor this does nothing. A backend failure is logged and
    /// the previous list stays in place; the dashboard shows no error for it.
    pub async fn load(&self) -> Result<(), MappingError> {
        let Some(actor) = &self.actor else {
            tracing::debug!("no session, skipping appointment load");
            return Ok(());
        };

        let _busy = BusyGuard::raise(&self.state, loading);

        match self.service.get_all_appointments().await {
            Ok(all) => {
                let mine: Vec<Appointment> = all
                    .into_iter()
                    .filter(|a| a.patient_id == actor.user_id)
                    .collect();
                tracing::debug!(count = mine.len(), patient_id = %actor.user_id, "appointments loaded");
                self.state.send_modify(|s| s.appointments = mine);
            }
            Err(ServiceError::Mapping(e)) => return Err(e),
            // TODO: surface this on the dashboard once it has an error banner
            Err(e) => {
                tracing::warn!(error = %e, "keeping previous appointment list");
            }
        }
        Ok(())
    }
}
