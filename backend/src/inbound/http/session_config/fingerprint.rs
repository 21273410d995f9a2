//! Session key fingerprints for startup logs.
//!
//! Operators compare the fingerprint logged at startup across replicas to
//! confirm they share one cookie key, without the key itself being logged.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex of the first eight SHA-256 bytes of the signing half of `key`.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use pantrie::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    digest
        .get(..FINGERPRINT_BYTES)
        .map(hex::encode)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_material_gives_same_fingerprint() {
        let first = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let second = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_material_gives_different_fingerprints() {
        assert_ne!(
            key_fingerprint(&Key::derive_from(&[b'a'; 64])),
            key_fingerprint(&Key::derive_from(&[b'b'; 64]))
        );
    }

    #[rstest]
    fn fingerprints_are_short_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
