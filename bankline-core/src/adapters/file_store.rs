//! File-backed credential store
//!
//! Persists the session as `session.json` in the bankline directory so it
//! survives between invocations. Writes go through a temp file + rename,
//! and every mutation holds an exclusive `fs2` lock on a sibling lock file,
//! so concurrent clears observe a single present-to-absent transition.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::Session;
use crate::ports::CredentialStore;

const SESSION_FILE: &str = "session.json";
const LOCK_FILE: &str = "session.lock";

/// On-disk session format.
///
/// Both fields are optional so a partial file left by an external writer
/// still loads; `session()` only reports a session when both are present.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// Credential store backed by `session.json` in the bankline directory
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Take the exclusive lock; released when the returned handle drops.
    fn lock(&self) -> Result<File> {
        fs::create_dir_all(&self.dir)?;
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        lock.lock_exclusive()?;
        Ok(lock)
    }

    /// Read the session file, treating missing or corrupt content as empty.
    fn read_file(&self) -> SessionFile {
        match fs::read_to_string(self.session_path()) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => SessionFile::default(),
        }
    }

    fn stored_token(file: &SessionFile) -> Option<String> {
        file.token.clone().filter(|t| !t.is_empty())
    }
}

impl CredentialStore for FileCredentialStore {
    fn set_session(&self, token: &str, username: &str) -> Result<()> {
        let _lock = self.lock()?;

        let file = SessionFile {
            token: Some(token.to_string()),
            username: Some(username.to_string()),
        };
        let content = serde_json::to_string_pretty(&file)?;

        // Rename is atomic on the same filesystem, so readers see either
        // the old session or the new one, never a torn write.
        let tmp_path = self.dir.join(format!("{}.tmp", SESSION_FILE));
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, self.session_path())?;

        tracing::info!(username, "session stored");
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        let file = self.read_file();
        match (Self::stored_token(&file), file.username) {
            (Some(token), Some(username)) => Some(Session::new(token, username)),
            _ => None,
        }
    }

    fn token(&self) -> Option<String> {
        Self::stored_token(&self.read_file())
    }

    fn username(&self) -> Option<String> {
        self.read_file().username.filter(|u| !u.is_empty())
    }

    fn clear_session(&self) -> Result<bool> {
        let _lock = self.lock()?;

        let had_token = Self::stored_token(&self.read_file()).is_some();
        match fs::remove_file(self.session_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if had_token {
            tracing::info!("session cleared");
        }
        Ok(had_token)
    }
}
