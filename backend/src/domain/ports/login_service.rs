//! Driving port for authenticating a session.
//!
//! Credential storage is outside this service. The only authenticator is
//! [`FixtureLoginService`], which admits the development account that the
//! initial migration and the in-memory store both seed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Username of the seeded development account.
pub const DEVELOPMENT_USERNAME: &str = "admin";
/// Identifier of the seeded development account.
pub const DEVELOPMENT_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// E-mail of the seeded development account.
pub const DEVELOPMENT_USER_EMAIL: &str = "admin@pantrie.local";
/// Display name of the seeded development account.
pub const DEVELOPMENT_DISPLAY_NAME: &str = "Pantrie Admin";
const DEVELOPMENT_PASSWORD: &str = "password";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Authenticator that admits only the development account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let known = credentials.username() == DEVELOPMENT_USERNAME
            || credentials.username() == DEVELOPMENT_USER_EMAIL;
        if known && credentials.password() == DEVELOPMENT_PASSWORD {
            UserId::new(DEVELOPMENT_USER_ID)
                .map_err(|err| Error::internal(format!("invalid development user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
