//! Persists the session token between runs.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ClientError;

pub const TOKEN_FILE_NAME: &str = "graphql_token.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// `graphql_token.txt` in the user's home directory.
    pub fn in_home_dir() -> Result<Self, ClientError> {
        let home = dirs::home_dir().ok_or(ClientError::NoHomeDir)?;
        Ok(Self::at(home.join(TOKEN_FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the token, readable by the owner only on Unix.
    pub fn save(&self, token: &str) -> Result<(), ClientError> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        // mode() only applies on create
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }
        file.write_all(token.as_bytes())
            .map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// The saved token, or `None` when no file (or only whitespace) exists.
    pub fn load(&self) -> Result<Option<String>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Remove the saved token. A missing file is not an error.
    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ClientError {
        ClientError::TokenStore {
            path: self.path.clone(),
            source,
        }
    }
}
