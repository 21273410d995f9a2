//! Unit tests for session configuration validation.

use std::io::Write;

use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn strong_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn inputs(path: &Path) -> SessionInputs {
    SessionInputs {
        key_file: path.to_path_buf(),
        cookie_secure: true,
        same_site: None,
        allow_ephemeral: false,
    }
}

fn missing_key() -> PathBuf {
    std::env::temp_dir().join(format!("pantrie-missing-key-{}", uuid::Uuid::new_v4()))
}

#[rstest]
fn release_accepts_a_strong_key(strong_key: NamedTempFile) {
    let settings =
        session_settings(&inputs(strong_key.path()), BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn the_same_key_file_yields_the_same_key(strong_key: NamedTempFile) {
    let first = session_settings(&inputs(strong_key.path()), BuildMode::Release).expect("first");
    let second = session_settings(&inputs(strong_key.path()), BuildMode::Release).expect("second");
    assert_eq!(
        fingerprint::key_fingerprint(&first.key),
        fingerprint::key_fingerprint(&second.key)
    );
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let err = session_settings(&inputs(short.path()), BuildMode::Release)
        .err()
        .expect("short key rejected");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn debug_accepts_short_keys() {
    let short = key_file(8);
    assert!(session_settings(&inputs(short.path()), BuildMode::Debug).is_ok());
}

#[rstest]
#[case(BuildMode::Debug, false, true)]
#[case(BuildMode::Release, false, false)]
fn missing_keys_fall_back_only_in_debug(
    #[case] mode: BuildMode,
    #[case] allow_ephemeral: bool,
    #[case] accepted: bool,
) {
    let mut raw = inputs(&missing_key());
    raw.allow_ephemeral = allow_ephemeral;
    assert_eq!(session_settings(&raw, mode).is_ok(), accepted);
}

#[rstest]
fn release_refuses_ephemeral_keys(strong_key: NamedTempFile) {
    let mut raw = inputs(strong_key.path());
    raw.allow_ephemeral = true;
    let err = session_settings(&raw, BuildMode::Release)
        .err()
        .expect("ephemeral refused");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case("strict", SameSite::Strict)]
#[case("Lax", SameSite::Lax)]
#[case("NONE", SameSite::None)]
fn same_site_is_case_insensitive(
    strong_key: NamedTempFile,
    #[case] raw: &str,
    #[case] expected: SameSite,
) {
    let mut config = inputs(strong_key.path());
    config.same_site = Some(raw.to_owned());
    let settings = session_settings(&config, BuildMode::Release).expect("valid same-site");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
#[case(BuildMode::Release, false)]
#[case(BuildMode::Debug, true)]
fn same_site_none_needs_secure_cookies_in_release(
    strong_key: NamedTempFile,
    #[case] mode: BuildMode,
    #[case] accepted: bool,
) {
    let mut config = inputs(strong_key.path());
    config.cookie_secure = false;
    config.same_site = Some("None".to_owned());
    assert_eq!(session_settings(&config, mode).is_ok(), accepted);
}

#[rstest]
fn unknown_same_site_values_are_rejected(strong_key: NamedTempFile) {
    let mut config = inputs(strong_key.path());
    config.same_site = Some("sometimes".to_owned());
    let err = session_settings(&config, BuildMode::Debug)
        .err()
        .expect("invalid same-site");
    assert!(matches!(err, SessionConfigError::InvalidSameSite { ref value, .. } if value == "sometimes"));
}
