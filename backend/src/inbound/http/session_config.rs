//! Session cookie configuration and validation.
//!
//! Turns the session-related fields of the loaded settings into the key and
//! cookie flags used by the session middleware. Release builds refuse weak or
//! missing keys; debug builds fall back to an ephemeral key with a warning.

pub mod fingerprint;

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` needs at least this much material.
const KEY_DERIVE_MIN_LEN: usize = 32;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing keys and emit warnings.
    Debug,
    /// Release builds require a strong key and consistent cookie flags.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pantrie::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session options as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInputs {
    /// File holding the cookie key material.
    pub key_file: PathBuf,
    /// Mark the cookie `Secure`.
    pub cookie_secure: bool,
    /// `Strict`, `Lax` or `None`; `Lax` when absent.
    pub same_site: Option<String>,
    /// Permit a generated key when the key file cannot be read.
    pub allow_ephemeral: bool,
}

/// Session settings ready for the middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// The `SameSite` option holds an unknown policy.
    #[error("invalid session same-site value '{value}'; expected {expected}")]
    InvalidSameSite {
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("session same-site None requires secure cookies")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("ephemeral session keys are not allowed in release builds")]
    EphemeralNotAllowed,
}

/// Validate `inputs` for `mode` and load the session key.
///
/// # Examples
///
/// ```rust
/// use pantrie::inbound::http::session_config::{session_settings, BuildMode, SessionInputs};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("pantrie_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let inputs = SessionInputs {
///     key_file: key_path.clone(),
///     cookie_secure: true,
///     same_site: Some("Strict".to_owned()),
///     allow_ephemeral: false,
/// };
/// let settings = session_settings(&inputs, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    inputs: &SessionInputs,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if inputs.allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let same_site = same_site(inputs.same_site.as_deref(), inputs.cookie_secure, mode)?;
    let key = session_key(&inputs.key_file, mode, inputs.allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure: inputs.cookie_secure,
        same_site,
    })
}

fn same_site(
    raw: Option<&str>,
    cookie_secure: bool,
    mode: BuildMode,
) -> Result<SameSite, SessionConfigError> {
    let Some(value) = raw else {
        return Ok(SameSite::Lax);
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("same-site None without secure cookies; browsers may reject the cookie");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ => Err(SessionConfigError::InvalidSameSite {
            value: value.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn session_key(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            if length < KEY_DERIVE_MIN_LEN {
                bytes.zeroize();
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short to derive from; using temporary key (dev only)"
                );
                return Ok(Key::generate());
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests;
