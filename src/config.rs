use std::env;

use crate::session::Actor;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub appointments_path: String,
    pub users_path: String,
    pub session_user_id: Option<String>,
    pub session_token: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080/api".to_string())
            .trim_end_matches('/')
            .to_string();
        if api_base_url.is_empty() {
            anyhow::bail!("API_BASE_URL is empty");
        }
        let appointments_path =
            env::var("APPOINTMENTS_PATH").unwrap_or_else(|_| "/consultas".to_string());
        let users_path = env::var("USERS_PATH").unwrap_or_else(|_| "/usuarios".to_string());

        Ok(Self {
            api_base_url,
            appointments_path,
            users_path,
            session_user_id: non_empty(env::var("SESSION_USER_ID").ok()),
            session_token: non_empty(env::var("SESSION_TOKEN").ok()),
        })
    }

    pub fn actor(&self) -> Option<Actor> {
        self.session_user_id.as_deref().map(Actor::new)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
