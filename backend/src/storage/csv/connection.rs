use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Manages the data directory layout and makes sure files exist before the
/// repositories touch them.
///
/// ```text
/// data/
/// ├── deliveries.csv            ← global: the webhook addresses logs by id only
/// ├── audio/                    ← synthesized MP3s, served statically
/// └── users/
///     └── {user_id}/
///         ├── user.yaml
///         ├── symptoms.csv
///         └── notifications.csv
/// ```
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection rooted at the given directory, creating it (and
    /// the `users/` subdirectory) if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        fs::create_dir_all(base_path.join("users"))?;

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory that synthesized audio files are written to.
    pub fn audio_directory(&self) -> PathBuf {
        self.base_directory.join("audio")
    }

    /// Directory holding all per-user folders.
    pub fn users_directory(&self) -> PathBuf {
        self.base_directory.join("users")
    }

    /// One user's data folder.
    pub fn user_directory(&self, user_id: &str) -> PathBuf {
        self.users_directory().join(user_id)
    }

    pub fn user_profile_path(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join("user.yaml")
    }

    pub fn symptoms_file_path(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join("symptoms.csv")
    }

    pub fn notifications_file_path(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join("notifications.csv")
    }

    /// The global delivery log file.
    pub fn deliveries_file_path(&self) -> PathBuf {
        self.base_directory.join("deliveries.csv")
    }

    /// Create a user's folder if it does not exist yet.
    pub fn ensure_user_directory(&self, user_id: &str) -> Result<PathBuf> {
        let dir = self.user_directory(user_id);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// Make sure a CSV file exists with the given header row.
    pub fn ensure_csv_file(&self, path: &Path, header: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            fs::write(path, format!("{header}\n"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn new_creates_the_users_directory() {
        let dir = tempdir().unwrap();
        let conn = CsvConnection::new(dir.path().join("data")).unwrap();
        assert!(conn.users_directory().exists());
    }

    #[test]
    fn ensure_csv_file_writes_header_once() {
        let dir = tempdir().unwrap();
        let conn = CsvConnection::new(dir.path()).unwrap();
        let path = conn.deliveries_file_path();

        conn.ensure_csv_file(&path, "id,user_id").unwrap();
        fs::write(&path, "id,user_id\nrow1,u1\n").unwrap();
        // A second ensure must not truncate existing data.
        conn.ensure_csv_file(&path, "id,user_id").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("row1"));
    }
}
