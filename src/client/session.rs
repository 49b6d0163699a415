use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ClientError;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
}

/// Who the client talks to and as whom. Passed explicitly to `ApiClient`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl Session {
    /// Session for `server` with no credentials
    pub fn anonymous(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            token: None,
            user: None,
        }
    }

    pub fn authenticated(server: impl Into<String>, token: String, user: SessionUser) -> Self {
        Self {
            server: server.into(),
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Read a saved session; `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ClientError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Remove a saved session. Removing a missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), ClientError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous(DEFAULT_SERVER)
    }
}
