/*
[INPUT]:  Token data and session storage directory
[OUTPUT]: Persisted session restorable by a later process
[POS]:    Auth layer - on-disk storage for the signed-in session
[UPDATE]: When session file format or location conventions change
*/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::auth::TokenData;

const SESSION_FILE_NAME: &str = "session.json";

/// Manages persistence of the current session token
#[derive(Debug, Clone)]
pub struct SessionFile {
    dir: PathBuf,
}

impl SessionFile {
    /// Create a session file handle in the given storage directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load the stored session, if any. Unreadable files are treated as absent.
    pub fn load(&self) -> Option<TokenData> {
        let path = self.path();
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable session file");
                None
            }
        }
    }

    /// Save the session to disk, readable only by the current user
    pub fn save(&self, data: &TokenData) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.path();
        let encoded = serde_json::to_string_pretty(data)?;
        fs::write(&path, encoded)?;
        restrict_permissions(&path)?;
        Ok(())
    }

    /// Remove the stored session. Missing files are not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(self.path()) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    /// Get the path of the session file
    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE_NAME)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;
    use std::env;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("trackit-test-{}", Uuid::new_v4()));
        path
    }

    fn token_data() -> TokenData {
        TokenData::new(
            "token-1".to_string(),
            User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        )
    }

    #[test]
    fn test_session_file_lifecycle() {
        let dir = temp_dir();
        let file = SessionFile::new(&dir);
        assert!(file.load().is_none());

        let data = token_data();
        file.save(&data).unwrap();
        assert_eq!(file.load(), Some(data));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(file.path()).unwrap();
            assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        }

        file.clear().unwrap();
        assert!(file.load().is_none());
        file.clear().unwrap();

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupt_session_file_is_ignored() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let file = SessionFile::new(&dir);
        fs::write(file.path(), "{not json").unwrap();

        assert!(file.load().is_none());

        fs::remove_dir_all(dir).unwrap();
    }
}
