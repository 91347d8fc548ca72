//! In-memory collaborators for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{BackendAppointment, CreateAppointmentRequest, IdRef, User, UserRole};
use crate::services::{AppointmentsApi, UserDirectory};

type Probe = Box<dyn Fn() + Send + Sync>;

pub fn backend_appointment(id: u64, patient_id: u64, status: &str) -> BackendAppointment {
    BackendAppointment {
        id,
        date_time: "2025-06-10T09:00:00".into(),
        specialty: "Cardiology".into(),
        patient: IdRef { id: patient_id },
        doctor: IdRef { id: 3 },
        notes: String::new(),
        status: Some(status.into()),
    }
}

pub fn doctor_user(id: &str, specialty: Option<&str>) -> User {
    User {
        id: id.into(),
        name: format!("Dr. {id}"),
        email: None,
        image: None,
        role: UserRole::Doctor {
            specialty: specialty.map(str::to_string),
        },
    }
}

pub fn patient_user(id: &str) -> User {
    User {
        id: id.into(),
        name: format!("Paciente {id}"),
        email: None,
        image: None,
        role: UserRole::Patient,
    }
}

fn unavailable() -> RemoteError {
    RemoteError::Status {
        status: 503,
        body: "unavailable".into(),
    }
}

#[derive(Default)]
pub struct MockAppointmentsApi {
    rows: Mutex<Vec<BackendAppointment>>,
    fail: AtomicBool,
    calls: AtomicUsize,
    list_calls: AtomicUsize,
    created: Mutex<Vec<CreateAppointmentRequest>>,
    cancelled: Mutex<Vec<u64>>,
    probe: Option<Probe>,
}

impl MockAppointmentsApi {
    pub fn with_rows(rows: Vec<BackendAppointment>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Runs `probe` inside every `create` call, before it answers.
    pub fn with_probe(mut self, probe: impl Fn() + Send + Sync + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Total number of remote calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<CreateAppointmentRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<u64> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn hit(&self) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AppointmentsApi for MockAppointmentsApi {
    async fn list(&self) -> Result<Vec<BackendAppointment>, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.hit()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<BackendAppointment, RemoteError> {
        if let Some(probe) = &self.probe {
            probe();
        }
        self.hit()?;
        self.created.lock().unwrap().push(req.clone());

        let mut rows = self.rows.lock().unwrap();
        let appt = BackendAppointment {
            id: 100 + rows.len() as u64,
            date_time: req.date_time.clone(),
            specialty: req.specialty.clone(),
            patient: req.patient,
            doctor: req.doctor,
            notes: req.notes.clone(),
            status: Some(req.status.as_token().to_string()),
        };
        rows.push(appt.clone());
        Ok(appt)
    }

    async fn get_by_id(&self, id: u64) -> Result<BackendAppointment, RemoteError> {
        self.hit()?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(RemoteError::Status {
                status: 404,
                body: "not found".into(),
            })
    }

    async fn cancel(&self, id: u64) -> Result<(), RemoteError> {
        self.hit()?;
        self.cancelled.lock().unwrap().push(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockUserDirectory {
    users: Vec<User>,
    fail: AtomicUsize,
    calls: AtomicUsize,
}

impl MockUserDirectory {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// Fails the next `times` calls, then serves the user list.
    pub fn failing_times(mut self, times: usize) -> Self {
        self.fail = AtomicUsize::new(times);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn list_all_users(&self) -> Result<Vec<User>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fail.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail.store(remaining - 1, Ordering::SeqCst);
            return Err(unavailable());
        }
        Ok(self.users.clone())
    }
}
