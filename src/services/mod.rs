use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{BackendAppointment, CreateAppointmentRequest, User};

pub mod appointments;
pub mod http;

#[cfg(test)]
pub mod mock;

pub use appointments::AppointmentsService;
pub use http::{HttpAppointmentsApi, HttpBackend, HttpUserDirectory};

/// Remote appointment store.
#[async_trait]
pub trait AppointmentsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<BackendAppointment>, RemoteError>;

    async fn create(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<BackendAppointment, RemoteError>;

    async fn get_by_id(&self, id: u64) -> Result<BackendAppointment, RemoteError>;

    async fn cancel(&self, id: u64) -> Result<(), RemoteError>;
}

/// Source of every user known to the backend, doctors included.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_all_users(&self) -> Result<Vec<User>, RemoteError>;
}
