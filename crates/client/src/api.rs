//! The `UsersApi` seam and its `reqwest` implementation.

use async_trait::async_trait;
use db::{NewUser, UserPatch, UserRow};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Default API root used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Operations the UI performs against the users API.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRow>>;
    async fn create(&self, user: &NewUser) -> Result<UserRow>;
    async fn update(&self, id: i32, patch: &UserPatch) -> Result<UserRow>;
    async fn delete(&self, id: i32) -> Result<UserRow>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpUsersApi {
    http: Client,
    base_url: String,
}

impl HttpUsersApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: i32) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self) -> Result<Vec<UserRow>> {
        debug!("GET {}", self.users_url());
        let response = self.http.get(self.users_url()).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, user: &NewUser) -> Result<UserRow> {
        debug!("POST {}", self.users_url());
        let response = self.http.post(self.users_url()).json(user).send().await?;
        Self::decode(response).await
    }

    async fn update(&self, id: i32, patch: &UserPatch) -> Result<UserRow> {
        debug!("PUT {}", self.user_url(id));
        let response = self.http.put(self.user_url(id)).json(patch).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: i32) -> Result<UserRow> {
        debug!("DELETE {}", self.user_url(id));
        let response = self.http.delete(self.user_url(id)).send().await?;
        Self::decode(response).await
    }
}
