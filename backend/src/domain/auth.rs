//! Login credentials accepted by the session endpoint.

use std::fmt;

use zeroize::Zeroizing;

/// Why a login payload was rejected before reaching the authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Username and password pair.
///
/// The username is trimmed and lowercased so `Admin` and `admin ` name the
/// same account. The password is kept verbatim and wiped from memory on drop.
///
/// # Examples
/// ```
/// use pantrie::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin ", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = username.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
