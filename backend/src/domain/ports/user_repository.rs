//! Port abstraction for user lookups and its errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}" => service_unavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}" => internal,
    }
}

/// Read access to registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by normalised e-mail address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;
}
