use super::ApiClient;
use crate::error::ApiError;
use merq_shared::{Id, User, UserCreate, UserUpdate};

#[derive(Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every account, unfiltered.
    pub async fn get_all(self) -> Result<Vec<User>, ApiError> {
        self.client.get("/users/").await
    }

    pub async fn get_by_id(self, id: Id) -> Result<User, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }

    /// Sign-up. Admin accounts cannot be created from the client.
    pub async fn create(self, data: &UserCreate) -> Result<User, ApiError> {
        self.client.post("/users/", data).await
    }

    /// The role is not part of [`UserUpdate`]: it never changes after sign-up.
    pub async fn update(self, id: Id, data: &UserUpdate) -> Result<User, ApiError> {
        self.client.patch(&format!("/users/{id}"), data).await
    }

    pub async fn delete(self, id: Id) -> Result<(), ApiError> {
        self.client.delete(&format!("/users/{id}")).await
    }
}
