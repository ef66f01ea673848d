//! REST API client
//!
//! `ApiClient` owns the base URL, the transport and the bearer-token slot.
//! The resource modules are thin facades: one method per backend call,
//! no retries, no validation.

mod ai;
mod attempts;
mod auth;
mod courses;
mod roadmaps;
mod users;

pub use ai::{AiApi, GENERATION_TIMEOUT};
pub use attempts::AttemptsApi;
pub use auth::AuthApi;
pub use courses::CoursesApi;
pub use roadmaps::RoadmapsApi;
pub use users::UsersApi;

use crate::error::ApiError;
use crate::web::{HttpRequest, HttpResponse, HttpTransport};
use merq_shared::{ErrorBody, HttpMethod};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

struct ClientInner {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    token: RefCell<Option<String>>,
}

/// Shared by every store; clones point at the same token slot.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                transport,
                token: RefCell::new(None),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token.borrow().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.inner.token.borrow_mut() = token;
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn courses(&self) -> CoursesApi<'_> {
        CoursesApi::new(self)
    }

    pub fn roadmaps(&self) -> RoadmapsApi<'_> {
        RoadmapsApi::new(self)
    }

    pub fn ai(&self) -> AiApi<'_> {
        AiApi::new(self)
    }

    pub fn attempts(&self) -> AttemptsApi<'_> {
        AttemptsApi::new(self)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// A request to `path` carrying the bearer token, if one is set.
    pub(crate) fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let req = HttpRequest::new(method, self.url(path));
        match self.inner.token.borrow().as_deref() {
            Some(token) => req.with_header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(HttpMethod::Get, path)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Post, path, body).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(HttpMethod::Patch, path, body).await
    }

    /// The response body of a delete is ignored.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.dispatch(self.request(HttpMethod::Delete, path))
            .await
            .map(|_| ())
    }

    async fn send_json<B, T>(&self, method: HttpMethod, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.execute(self.request(method, path).with_json(json)).await
    }

    /// Sends `req` and decodes a successful body as `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        req: HttpRequest,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(req).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn dispatch(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = req.method.as_str();
        let url = req.url.clone();
        debug!(method, url = %url, "api request");

        let response = match self.inner.transport.send(req).await {
            Ok(response) => response,
            Err(err) => {
                warn!(method, url = %url, error = %err, "api request failed");
                return Err(err);
            }
        };
        if response.is_success() {
            return Ok(response);
        }

        let detail = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message().map(str::to_string));
        warn!(
            method,
            url = %url,
            status = response.status,
            detail = detail.as_deref().unwrap_or("-"),
            "api request rejected"
        );
        Err(ApiError::Status {
            status: response.status,
            detail,
        })
    }
}

#[cfg(test)]
mod tests;
