//! Session context: populated on login, cleared on logout, restored once
//! at startup. Stored as JSON under the platform config directory.

use std::{fs, io::Write, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{config, types::User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

fn session_path() -> Option<PathBuf> {
    config::config_root().map(|dir| dir.join("session.json"))
}

pub fn load_session() -> Option<Session> {
    load_session_from(&session_path()?)
}

pub fn save_session(session: &Session) -> std::io::Result<()> {
    let path = session_path()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no config dir"))?;
    save_session_to(&path, session)
}

pub fn clear_session() -> std::io::Result<()> {
    if let Some(path) = session_path() {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

fn load_session_from(path: &Path) -> Option<Session> {
    let data = fs::read(path).ok()?;
    serde_json::from_slice(&data).ok()
}

fn save_session_to(path: &Path, session: &Session) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path)?;
    let s = serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".into());
    f.write_all(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Preferences;

    fn sample() -> Session {
        Session {
            token: "tok".into(),
            user: User {
                id: "u1".into(),
                username: "ana".into(),
                email: "ana@example.com".into(),
                full_name: String::new(),
                reading_preferences: Preferences::default(),
            },
        }
    }

    #[test]
    fn round_trips_through_the_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        save_session_to(&path, &sample()).unwrap();
        let loaded = load_session_from(&path).unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.user.username, "ana");
    }

    #[test]
    fn missing_or_corrupt_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert!(load_session_from(&path).is_none());
        fs::write(&path, b"not json").unwrap();
        assert!(load_session_from(&path).is_none());
    }
}
