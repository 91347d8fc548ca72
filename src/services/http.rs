// src/services/http.rs

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::RemoteError;
use crate::models::{BackendAppointment, CreateAppointmentRequest, User};
use crate::services::{AppointmentsApi, UserDirectory};

/// Shared reqwest client, base URL and bearer token.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.api_base_url, cfg.session_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let response = self.authorized(builder).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(&url)).await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/* ============================================================
   Appointments
   ============================================================ */

#[derive(Debug, Clone)]
pub struct HttpAppointmentsApi {
    backend: HttpBackend,
    path: String,
}

impl HttpAppointmentsApi {
    pub fn new(backend: HttpBackend, path: impl Into<String>) -> Self {
        Self {
            backend,
            path: path.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(HttpBackend::from_config(cfg), cfg.appointments_path.clone())
    }

    fn item_path(&self, id: u64) -> String {
        format!("{}/{id}", self.path)
    }
}

#[async_trait]
impl AppointmentsApi for HttpAppointmentsApi {
    async fn list(&self) -> Result<Vec<BackendAppointment>, RemoteError> {
        self.backend.get_json(&self.path).await
    }

    async fn create(
        &self,
        req: &CreateAppointmentRequest,
    ) -> Result<BackendAppointment, RemoteError> {
        let url = self.backend.url(&self.path);
        tracing::debug!(%url, "POST");
        let response = self
            .backend
            .send(self.backend.client.post(&url).json(req))
            .await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn get_by_id(&self, id: u64) -> Result<BackendAppointment, RemoteError> {
        self.backend.get_json(&self.item_path(id)).await
    }

    async fn cancel(&self, id: u64) -> Result<(), RemoteError> {
        let url = self.backend.url(&self.item_path(id));
        tracing::debug!(%url, "DELETE");
        self.backend.send(self.backend.client.delete(&url)).await?;
        Ok(())
    }
}

/* ============================================================
   Users
   ============================================================ */

#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    backend: HttpBackend,
    path: String,
}

impl HttpUserDirectory {
    pub fn new(backend: HttpBackend, path: impl Into<String>) -> Self {
        Self {
            backend,
            path: path.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(HttpBackend::from_config(cfg), cfg.users_path.clone())
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_all_users(&self) -> Result<Vec<User>, RemoteError> {
        self.backend.get_json(&self.path).await
    }
}
