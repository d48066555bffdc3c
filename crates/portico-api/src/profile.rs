//! Responder profile resolution and loading.
//!
//! The profile is a single TOML file. An explicitly given path (flag or
//! `PORTICO_PROFILE`) must exist; the default path may be absent, in which
//! case the built-in copy is used.

use std::fmt;
use std::path::{Path, PathBuf};

use portico_types::error::ProfileError;
use portico_types::profile::ResponderProfile;

/// Where the effective profile came from, for display in banners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// No profile file; the compiled-in defaults.
    BuiltIn,
    /// Loaded from this file.
    File(PathBuf),
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSource::BuiltIn => write!(f, "built-in defaults"),
            ProfileSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PORTICO_DATA_DIR` environment variable
/// 2. `~/.portico`
/// 3. `.portico` in the working directory, when no home exists
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PORTICO_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".portico");
    }

    PathBuf::from(".portico")
}

/// Default location of the profile file.
pub fn default_profile_path() -> PathBuf {
    resolve_data_dir().join("profile.toml")
}

/// Load the effective responder profile.
///
/// With an explicit path the file must exist. Without one, a missing default
/// file falls back to the built-in profile, but an unreadable or invalid
/// default file is still an error -- broken copy should never be silently
/// replaced.
pub async fn load_profile(
    explicit: Option<&Path>,
) -> Result<(ResponderProfile, ProfileSource), ProfileError> {
    match explicit {
        Some(path) => {
            let profile = read_profile(path).await?;
            Ok((profile, ProfileSource::File(path.to_path_buf())))
        }
        None => {
            let path = default_profile_path();
            if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Ok((ResponderProfile::default(), ProfileSource::BuiltIn));
            }
            let profile = read_profile(&path).await?;
            Ok((profile, ProfileSource::File(path)))
        }
    }
}

async fn read_profile(path: &Path) -> Result<ResponderProfile, ProfileError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(ProfileError::NotFound(path.to_path_buf()));
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ProfileError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let profile: ResponderProfile = toml::from_str(&raw).map_err(|e| ProfileError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_temp_profile(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        tokio::fs::write(&path, contents).await.unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn explicit_profile_is_loaded_and_reported_as_source() {
        let (_dir, path) = write_temp_profile(
            r#"
title = "Ask away"
reply_delay_ms = 10
"#,
        )
        .await;

        let (profile, source) = load_profile(Some(&path)).await.unwrap();
        assert_eq!(profile.title, "Ask away");
        assert_eq!(profile.reply_delay_ms, 10);
        assert_eq!(source, ProfileSource::File(path));
    }

    #[tokio::test]
    async fn missing_explicit_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = load_profile(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(_)));
    }

    #[tokio::test]
    async fn unparseable_profile_is_an_error() {
        let (_dir, path) = write_temp_profile("title = [not toml").await;

        let err = load_profile(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
    }

    #[tokio::test]
    async fn invalid_profile_copy_is_an_error() {
        let (_dir, path) = write_temp_profile(
            r#"
greeting = "   "
"#,
        )
        .await;

        let err = load_profile(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ProfileError::Invalid(_)));
    }

    #[test]
    fn profile_source_display() {
        assert_eq!(ProfileSource::BuiltIn.to_string(), "built-in defaults");
        assert_eq!(
            ProfileSource::File(PathBuf::from("/tmp/p.toml")).to_string(),
            "/tmp/p.toml"
        );
    }
}
