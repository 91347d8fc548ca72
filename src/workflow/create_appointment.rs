// src/workflow/create_appointment.rs

use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use regex::Regex;
use tokio::sync::watch;

use crate::error::{MappingError, ServiceError, ValidationError};
use crate::messages;
use crate::models::{Appointment, AppointmentDraft, Doctor};
use crate::services::{AppointmentsApi, AppointmentsService, UserDirectory};
use crate::session::Actor;
use crate::translator;
use crate::workflow::BusyGuard;

static FORM_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").unwrap());

/// Everything the booking form shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAppointmentState {
    /// As typed, DD/MM/YYYY.
    pub date: String,
    /// HH:MM
    pub time: String,
    pub selected_doctor: Option<Doctor>,
    /// Patient-written notes; `None` or blank gets a generated note.
    pub notes: Option<String>,
    pub doctors: Vec<Doctor>,
    pub loading_doctors: bool,
    pub submitting: bool,
    /// Empty means no error.
    pub error: String,
    /// Set when a submission succeeds, before `submitting` drops.
    pub created: Option<Appointment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Appointment),
    /// Rejected locally; nothing was sent.
    Invalid(ValidationError),
    /// The backend call failed; `error` holds the retry message.
    Failed,
}

/// One create-appointment interaction.
pub struct CreateAppointment {
    service: AppointmentsService,
    directory: Arc<dyn UserDirectory>,
    actor: Option<Actor>,
    activated: AtomicBool,
    state: watch::Sender<CreateAppointmentState>,
}

fn loading_doctors(s: &mut CreateAppointmentState) -> &mut bool {
    &mut s.loading_doctors
}

fn submitting(s: &mut CreateAppointmentState) -> &mut bool {
    &mut s.submitting
}

impl CreateAppointment {
    pub fn new(
        appointments: Arc<dyn AppointmentsApi>,
        directory: Arc<dyn UserDirectory>,
        actor: Option<Actor>,
    ) -> Self {
        let (state, _) = watch::channel(CreateAppointmentState {
            loading_doctors: true,
            ..Default::default()
        });
        Self {
            service: AppointmentsService::new(appointments),
            directory,
            actor,
            activated: AtomicBool::new(false),
            state,
        }
    }

    pub fn state(&self) -> CreateAppointmentState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CreateAppointmentState> {
        self.state.subscribe()
    }

    /// Loads the doctor list the first time it is called; later calls do nothing.
    pub async fn activate(&self) {
        if self.activated.swap(true, Ordering::SeqCst) {
            return;
        }
        self.load_doctors().await;
    }

    /// Fetches the directory and keeps the doctors. Safe to call again to retry.
    pub async fn load_doctors(&self) {
        let _busy = BusyGuard::raise(&self.state, loading_doctors);
        self.state.send_modify(|s| s.error.clear());

        match self.directory.list_all_users().await {
            Ok(users) => {
                let doctors = translator::doctors_from_users(&users);
                tracing::debug!(users = users.len(), doctors = doctors.len(), "doctor directory loaded");
                self.state.send_modify(|s| s.doctors = doctors);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load doctors");
                self.state
                    .send_modify(|s| s.error = messages::LOAD_DOCTORS_FAILED.to_string());
            }
        }
    }

    pub fn set_date(&self, date: impl Into<String>) {
        let date = date.into();
        self.state.send_modify(|s| s.date = date);
    }

    pub fn set_time(&self, time: impl Into<String>) {
        let time = time.into();
        self.state.send_modify(|s| s.time = time);
    }

    pub fn set_notes(&self, notes: Option<String>) {
        self.state.send_modify(|s| s.notes = notes);
    }

    pub fn select_doctor(&self, doctor: Option<Doctor>) {
        self.state.send_modify(|s| s.selected_doctor = doctor);
    }

    /// Selects a doctor from the loaded list. Returns false if the id is unknown.
    pub fn select_doctor_by_id(&self, doctor_id: &str) -> bool {
        self.state.send_if_modified(|s| {
            match s.doctors.iter().find(|d| d.id == doctor_id).cloned() {
                Some(d) => {
                    s.selected_doctor = Some(d);
                    true
                }
                None => false,
            }
        })
    }

    /// Validates the form and, if it passes, books the appointment.
    ///
    /// Validation failures and backend failures land in `state().error` and
    /// are reported through the outcome. A [`MappingError`] means the session
    /// or directory handed us an id that is not a number, and is returned as-is.
    pub async fn submit(&self) -> Result<SubmitOutcome, MappingError> {
        let checked = build_draft(&self.state.borrow(), self.actor.as_ref());
        let draft = match checked {
            Ok(d) => d,
            Err(v) => {
                tracing::debug!(reason = ?v, "appointment form rejected");
                self.state.send_modify(|s| s.error = v.to_string());
                return Ok(SubmitOutcome::Invalid(v));
            }
        };

        let _busy = BusyGuard::raise(&self.state, submitting);
        self.state.send_modify(|s| {
            s.error.clear();
            s.created = None;
        });

        let req = translator::to_backend_create_request(&draft)?;

        match self.service.create_appointment(&req).await {
            Ok(appt) => {
                tracing::info!(appointment_id = %appt.id, "{}", messages::SCHEDULED_OK);
                self.state.send_modify(|s| {
                    s.date.clear();
                    s.time.clear();
                    s.selected_doctor = None;
                    s.notes = None;
                    s.created = Some(appt.clone());
                });
                Ok(SubmitOutcome::Created(appt))
            }
            Err(ServiceError::Mapping(e)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "appointment submission failed");
                self.state
                    .send_modify(|s| s.error = messages::SCHEDULE_FAILED.to_string());
                Ok(SubmitOutcome::Failed)
            }
        }
    }
}

/// Rewrites `DD/MM/YYYY` as `YYYY-MM-DD` by moving fields; no calendar check.
pub fn reformat_form_date(date: &str) -> Option<String> {
    let caps = FORM_DATE.captures(date)?;
    Some(format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]))
}

fn build_draft(
    form: &CreateAppointmentState,
    actor: Option<&Actor>,
) -> Result<AppointmentDraft, ValidationError> {
    let (Some(doctor), Some(actor)) = (&form.selected_doctor, actor) else {
        return Err(ValidationError::MissingFields);
    };
    if form.date.is_empty() || form.time.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let date = reformat_form_date(&form.date).ok_or(ValidationError::InvalidDateFormat)?;

    let notes = form
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| messages::default_notes(&doctor.specialty));

    Ok(AppointmentDraft {
        date,
        time: form.time.clone(),
        specialty: doctor.specialty.clone(),
        patient_id: actor.user_id.clone(),
        doctor_id: doctor.id.clone(),
        notes,
    })
}
