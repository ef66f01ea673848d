//! Authentication store
//!
//! The session moves through three phases:
//!
//! ```text
//! Anonymous --login--> TokenOnly --/auth/me ok--> Authenticated
//!     ^                    |                           |
//!     +----/auth/me failed-+-----------logout----------+
//! ```
//!
//! The token is mirrored into durable storage on every change, and into
//! the API client's bearer slot so later requests carry it.

use super::{Store, SubscriptionId};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::web::KeyValueStorage;
use crate::web::route::Session;
use merq_shared::{LoginRequest, User, UserCreate};
use std::rc::Rc;
use tracing::{info, warn};

pub const STORAGE_TOKEN_KEY: &str = "token";

const LOGIN_FAILED: &str = "Error al iniciar sesión";
const REGISTER_FAILED: &str = "Error al registrarse";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    /// Token known, user not resolved yet
    TokenOnly,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_teacher(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_teacher)
    }

    pub fn is_student(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_student)
    }

    pub fn phase(&self) -> AuthPhase {
        match (&self.token, &self.user) {
            (Some(_), Some(_)) => AuthPhase::Authenticated,
            (Some(_), None) => AuthPhase::TokenOnly,
            // a user without a token cannot make requests
            (None, _) => AuthPhase::Anonymous,
        }
    }

    /// Route guard input.
    pub fn session(&self) -> Session {
        match &self.user {
            Some(user) if self.is_authenticated() => Session::signed_in(&user.username),
            _ => Session::anonymous(),
        }
    }
}

#[derive(Clone)]
pub struct AuthStore {
    store: Store<AuthState>,
    api: ApiClient,
    storage: Rc<dyn KeyValueStorage>,
}

impl AuthStore {
    /// Restores the token left by a previous visit. The user is resolved
    /// later by `fetch_current_user`.
    pub fn new(api: ApiClient, storage: Rc<dyn KeyValueStorage>) -> Self {
        let token = storage.get(STORAGE_TOKEN_KEY);
        api.set_token(token.clone());
        Self {
            store: Store::new(AuthState { user: None, token }),
            api,
            storage,
        }
    }

    pub fn state(&self) -> AuthState {
        self.store.snapshot()
    }

    pub fn user(&self) -> Option<User> {
        self.store.with(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.store.with(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.with(AuthState::is_authenticated)
    }

    pub fn is_teacher(&self) -> bool {
        self.store.with(AuthState::is_teacher)
    }

    pub fn is_student(&self) -> bool {
        self.store.with(AuthState::is_student)
    }

    pub fn phase(&self) -> AuthPhase {
        self.store.with(AuthState::phase)
    }

    pub fn session(&self) -> Session {
        self.store.with(AuthState::session)
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn set_user(&self, user: Option<User>) {
        self.store.update(|s| s.user = user);
    }

    /// Persists or clears the token, then publishes it.
    pub fn set_token(&self, token: Option<String>) {
        let persisted = match &token {
            Some(value) => self.storage.set(STORAGE_TOKEN_KEY, value),
            None => self.storage.delete(STORAGE_TOKEN_KEY),
        };
        if !persisted {
            warn!("could not persist auth token");
        }
        self.api.set_token(token.clone());
        self.store.update(|s| s.token = token);
    }

    /// Resolves the user behind the stored token. Without a token this does
    /// nothing; a rejected token ends the session.
    pub async fn fetch_current_user(&self) {
        if self.token().is_none() {
            return;
        }
        let _loading = self.store.begin();
        // the failure already ended the session
        let _ = self.load_user().await;
    }

    pub fn logout(&self) {
        self.store.update(|s| s.user = None);
        self.set_token(None);
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let _loading = self.store.begin();
        self.sign_in(credentials).await
    }

    /// Creates the account, then signs in with the same credentials.
    pub async fn register(&self, data: &UserCreate) -> Result<User, ApiError> {
        let _loading = self.store.begin();
        if let Err(err) = self.api.users().create(data).await {
            warn!(username = %data.username, error = %err, "registration failed");
            self.store.fail(err.message_or(REGISTER_FAILED));
            return Err(err);
        }
        let credentials = LoginRequest {
            email: data.email.clone(),
            password: data.password.clone(),
        };
        self.sign_in(&credentials).await
    }

    async fn sign_in(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let response = match self.api.auth().login(credentials).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "login failed");
                self.store.fail(err.message_or(LOGIN_FAILED));
                return Err(err);
            }
        };
        self.set_token(Some(response.access_token));
        match self.load_user().await {
            Ok(user) => Ok(user),
            Err(err) => {
                self.store.fail(err.message_or(LOGIN_FAILED));
                Err(err)
            }
        }
    }

    async fn load_user(&self) -> Result<User, ApiError> {
        match self.api.auth().me().await {
            Ok(user) => {
                self.set_user(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                info!(error = %err, "current user unavailable, signing out");
                self.logout();
                Err(err)
            }
        }
    }
}
