//! User directory client.

use entities::{NewUser, User, UserPatch};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{ClientError, ClientResult};

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Typed client for `/api/users`.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    users_url: Url,
}

impl UserClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Creates a client that reuses an existing `reqwest` client.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> ClientResult<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let users_url = base.join("api/users")?;
        Ok(Self { http, users_url })
    }

    fn user_url(&self, id: u64) -> ClientResult<Url> {
        let mut url = self.users_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(&id.to_string());
        Ok(url)
    }

    /// Lists all users.
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let response = self.http.get(self.users_url.clone()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Gets a user by ID. Returns `None` on 404.
    pub async fn get_user(&self, id: u64) -> ClientResult<Option<User>> {
        let response = self.http.get(self.user_url(id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(response).await?.json().await?))
    }

    /// Creates a user.
    pub async fn create_user(&self, new: &NewUser) -> ClientResult<User> {
        let response = self
            .http
            .post(self.users_url.clone())
            .json(new)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Updates a user. Returns `None` on 404.
    pub async fn update_user(&self, id: u64, patch: &UserPatch) -> ClientResult<Option<User>> {
        let response = self.http.put(self.user_url(id)?).json(patch).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(response).await?.json().await?))
    }

    /// Deletes a user. Returns `false` on 404.
    pub async fn delete_user(&self, id: u64) -> ClientResult<bool> {
        let response = self.http.delete(self.user_url(id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response).await?;
        Ok(true)
    }
}

/// Turns an error status into [`ClientError::Api`].
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };
    tracing::debug!(status = status.as_u16(), message = %message, "API request failed");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
