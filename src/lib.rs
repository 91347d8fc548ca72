//! Appointment booking client: translation between the clinic backend's
//! appointment records and the app's, plus the booking and dashboard workflows.

pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod services;
pub mod session;
pub mod translator;
pub mod workflow;

pub use error::{MappingError, RemoteError, ServiceError, ValidationError};
pub use session::Actor;
