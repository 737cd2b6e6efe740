//! Auth endpoints and the session state machine.
//!
//! The lifecycle is `Anonymous → Authenticating → Authenticated` and back to
//! `Anonymous` on logout or any 401. The persisted token and user live in the
//! profile store under the same keys the browser build used; persistence
//! failures are logged and never block the auth flow itself.

use std::sync::{Arc, Mutex, PoisonError};

use reloc_core::User;
use reloc_store::{ProfileStore, AUTH_TOKEN_KEY, USER_KEY};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

impl ApiClient {
    /// # Errors
    ///
    /// [`ApiError::Auth`]/[`ApiError::Validation`] with the server-provided
    /// message on rejected credentials, otherwise any [`ApiError`] from the
    /// shared request path.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.post_json("/auth/login", &request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the shared request path.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }

    /// Fetches the account belonging to the installed bearer token.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] when the token is missing or stale, otherwise any
    /// [`ApiError`] from the shared request path.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Owns the auth lifecycle on top of the gateway and the profile store.
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: ProfileStore,
    state: Mutex<AuthState>,
    user: Mutex<Option<User>>,
}

impl SessionManager {
    /// Builds the manager and installs any persisted token on the gateway.
    /// The user stays unset until [`SessionManager::validate`] confirms the
    /// token — `user` is only ever non-empty for a validated session.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, store: ProfileStore) -> Self {
        if let Ok(Some(token)) = store.get::<String>(AUTH_TOKEN_KEY) {
            api.set_token(token);
        }
        Self {
            api,
            store,
            state: Mutex::new(AuthState::Anonymous),
            user: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    fn set_state(&self, state: AuthState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Validates a persisted token against the current-user endpoint. Called
    /// once at startup; a missing token is simply an anonymous session.
    ///
    /// Any failure — a rejected token or an unreachable backend — clears the
    /// persisted session before the error is returned, so a broken token is
    /// never retried on the next start.
    ///
    /// # Errors
    ///
    /// The [`ApiError`] from the current-user call.
    pub async fn validate(&self) -> Result<Option<User>, ApiError> {
        if self.api.token().is_none() {
            return Ok(None);
        }

        match self.api.current_user().await {
            Ok(user) => {
                self.persist_user(&user);
                self.set_user(Some(user.clone()));
                self.set_state(AuthState::Authenticated);
                tracing::debug!(user = %user.email, "persisted session validated");
                Ok(Some(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "session validation failed; clearing stored token");
                self.clear_session();
                Err(e)
            }
        }
    }

    /// Signs in. On success the token and user are stored in memory and on
    /// disk; on failure the session stays anonymous and the server-provided
    /// message is in the returned error. Never retried automatically.
    ///
    /// # Errors
    ///
    /// The [`ApiError`] from the login call.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.set_state(AuthState::Authenticating);

        match self.api.login(email, password).await {
            Ok(LoginResponse { access_token, user }) => {
                self.api.set_token(access_token.clone());
                if let Err(e) = self.store.set(AUTH_TOKEN_KEY, &access_token) {
                    tracing::warn!(error = %e, "failed to persist auth token");
                }
                self.persist_user(&user);
                self.set_user(Some(user.clone()));
                self.set_state(AuthState::Authenticated);
                Ok(user)
            }
            Err(e) => {
                self.set_state(AuthState::Anonymous);
                Err(e)
            }
        }
    }

    /// Creates an account. Does not sign in; the caller directs the user to
    /// the login flow. Never retried automatically.
    ///
    /// # Errors
    ///
    /// The [`ApiError`] from the register call.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.api.register(request).await
    }

    /// Explicit sign-out.
    pub fn logout(&self) {
        self.clear_session();
    }

    /// The 401 funnel: any authenticated call that comes back `Auth` routes
    /// here so the stored token and user are gone before the login view is
    /// shown again.
    pub fn handle_unauthorized(&self) {
        self.clear_session();
    }

    fn clear_session(&self) {
        self.api.clear_token();
        self.set_user(None);
        self.set_state(AuthState::Anonymous);
        for key in [AUTH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear persisted session");
            }
        }
    }

    fn persist_user(&self, user: &User) {
        if let Err(e) = self.store.set(USER_KEY, user) {
            tracing::warn!(error = %e, "failed to persist user record");
        }
    }
}
