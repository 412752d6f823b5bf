use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;

use super::connection::CsvConnection;
use crate::domain::models::{Personality, User};
use crate::storage::traits::UserStorage;

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlUser {
    id: String,
    name: String,
    phone: String,
    lga: String,
    personality: String,
    registered_at: String,
}

impl From<&User> for YamlUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            lga: user.lga.clone(),
            personality: user.personality.key().to_string(),
            registered_at: user.registered_at.to_rfc3339(),
        }
    }
}

impl YamlUser {
    fn into_domain(self) -> Result<User> {
        let registered_at = DateTime::parse_from_rfc3339(&self.registered_at)
            .with_context(|| format!("invalid registered_at for user {}", self.id))?
            .with_timezone(&Utc);
        Ok(User {
            id: self.id,
            name: self.name,
            phone: self.phone,
            lga: self.lga,
            personality: Personality::parse(&self.personality),
            registered_at,
        })
    }
}

/// File-based user repository: one folder per user holding a `user.yaml`
/// profile, discovered by scanning the users directory.
#[derive(Clone)]
pub struct UserRepository {
    connection: CsvConnection,
}

impl UserRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn write_profile(&self, user: &User) -> Result<()> {
        self.connection.ensure_user_directory(&user.id)?;
        let yaml = serde_yaml::to_string(&YamlUser::from(user))?;
        fs::write(self.connection.user_profile_path(&user.id), yaml)?;
        Ok(())
    }

    fn load_profile(&self, user_id: &str) -> Result<Option<User>> {
        let path = self.connection.user_profile_path(user_id);
        if !path.exists() {
            return Ok(None);
        }
        let yaml = fs::read_to_string(&path)?;
        let parsed: YamlUser = serde_yaml::from_str(&yaml)
            .with_context(|| format!("invalid user profile at {}", path.display()))?;
        Ok(Some(parsed.into_domain()?))
    }

    /// Discover all users by scanning the users directory.
    fn discover_users(&self) -> Result<Vec<User>> {
        let users_dir = self.connection.users_directory();
        if !users_dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in fs::read_dir(&users_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let dir_name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!("skipping user directory with non-UTF8 name");
                    continue;
                }
            };
            match self.load_profile(&dir_name) {
                Ok(Some(user)) => users.push(user),
                Ok(None) => debug!("directory {dir_name} has no user profile"),
                Err(e) => warn!("failed to load user from {dir_name}: {e}"),
            }
        }

        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

impl UserStorage for UserRepository {
    fn store_user(&self, user: &User) -> Result<()> {
        self.write_profile(user)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.load_profile(user_id)
    }

    fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        Ok(self
            .discover_users()?
            .into_iter()
            .find(|u| u.phone == phone))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.discover_users()
    }

    fn update_user(&self, user: &User) -> Result<()> {
        if !self.connection.user_profile_path(&user.id).exists() {
            anyhow::bail!("user not found: {}", user.id);
        }
        self.write_profile(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_user(name: &str, phone: &str) -> User {
        User {
            id: User::generate_id(),
            name: name.to_string(),
            phone: phone.to_string(),
            lga: "Ikeja".to_string(),
            personality: Personality::default(),
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn store_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let repo = UserRepository::new(CsvConnection::new(dir.path()).unwrap());

        let user = test_user("Amina", "+2348012345678");
        repo.store_user(&user).unwrap();

        let loaded = repo.get_user(&user.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Amina");
        assert_eq!(loaded.phone, "+2348012345678");
        assert_eq!(loaded.personality, Personality::CaringNeighbor);
    }

    #[test]
    fn get_missing_user_returns_none() {
        let dir = tempdir().unwrap();
        let repo = UserRepository::new(CsvConnection::new(dir.path()).unwrap());
        assert!(repo.get_user("nope").unwrap().is_none());
    }

    #[test]
    fn list_users_sorts_by_name() {
        let dir = tempdir().unwrap();
        let repo = UserRepository::new(CsvConnection::new(dir.path()).unwrap());

        repo.store_user(&test_user("Zainab", "+2348000000001")).unwrap();
        repo.store_user(&test_user("Bola", "+2348000000002")).unwrap();

        let users = repo.list_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Bola");
        assert_eq!(users[1].name, "Zainab");
    }

    #[test]
    fn find_by_phone_matches_exactly() {
        let dir = tempdir().unwrap();
        let repo = UserRepository::new(CsvConnection::new(dir.path()).unwrap());

        let user = test_user("Amina", "+2348012345678");
        repo.store_user(&user).unwrap();

        assert_eq!(
            repo.find_by_phone("+2348012345678").unwrap().unwrap().id,
            user.id
        );
        assert!(repo.find_by_phone("+2348099999999").unwrap().is_none());
    }

    #[test]
    fn update_rewrites_the_profile() {
        let dir = tempdir().unwrap();
        let repo = UserRepository::new(CsvConnection::new(dir.path()).unwrap());

        let mut user = test_user("Amina", "+2348012345678");
        repo.store_user(&user).unwrap();

        user.personality = Personality::MarketAunty;
        repo.update_user(&user).unwrap();

        let loaded = repo.get_user(&user.id).unwrap().unwrap();
        assert_eq!(loaded.personality, Personality::MarketAunty);
    }

    #[test]
    fn update_unknown_user_fails() {
        let dir = tempdir().unwrap();
        let repo = UserRepository::new(CsvConnection::new(dir.path()).unwrap());
        assert!(repo.update_user(&test_user("Ghost", "+234")).is_err());
    }
}
