use super::ApiClient;
use crate::error::ApiError;
use merq_shared::{LoginRequest, LoginResponse, User};

#[derive(Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// The returned `user` is not trusted as the session user; the auth store
    /// asks `/auth/me` once the token is installed.
    pub async fn login(self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client.post("/auth/login", credentials).await
    }

    /// The account behind the current bearer token.
    pub async fn me(self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await
    }
}
