use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

use crate::domain::models::{Personality, User};
use crate::storage::csv::{CsvConnection, UserRepository};
use crate::storage::traits::UserStorage;

/// Service for user registration and lookups.
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            user_repository: UserRepository::new(connection),
        }
    }

    /// Register a new user. The phone number must not already be registered.
    pub fn register(
        &self,
        name: &str,
        phone: &str,
        lga: &str,
        personality: Option<&str>,
    ) -> Result<User> {
        let name = name.trim();
        let phone = phone.trim();
        let lga = lga.trim();

        if name.is_empty() {
            anyhow::bail!("name cannot be empty");
        }
        if phone.is_empty() {
            anyhow::bail!("phone cannot be empty");
        }
        if lga.is_empty() {
            anyhow::bail!("LGA cannot be empty");
        }

        if let Some(existing) = self.user_repository.find_by_phone(phone)? {
            warn!("registration rejected, phone already used by user {}", existing.id);
            anyhow::bail!("phone number is already registered");
        }

        let user = User {
            id: User::generate_id(),
            name: name.to_string(),
            phone: phone.to_string(),
            lga: lga.to_string(),
            personality: personality.map(Personality::parse).unwrap_or_default(),
            registered_at: Utc::now(),
        };
        self.user_repository.store_user(&user)?;

        info!("registered user {} in {}", user.id, user.lga);
        Ok(user)
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.user_repository.get_user(user_id)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.user_repository.list_users()
    }

    /// Change the message personality, the only mutable user field.
    pub fn update_personality(&self, user_id: &str, personality: &str) -> Result<User> {
        let mut user = self
            .user_repository
            .get_user(user_id)?
            .ok_or_else(|| anyhow::anyhow!("user not found: {user_id}"))?;

        user.personality = Personality::parse(personality);
        self.user_repository.update_user(&user)?;

        info!("user {} personality set to {}", user.id, user.personality.key());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> UserService {
        let dir = tempdir().unwrap();
        let conn = CsvConnection::new(dir.path().to_path_buf()).unwrap();
        // Leak the tempdir so files outlive the setup helper.
        std::mem::forget(dir);
        UserService::new(conn)
    }

    #[test]
    fn register_trims_and_defaults_personality() {
        let service = setup_test();
        let user = service
            .register("  Amina ", " +2348012345678 ", " Kano ", None)
            .unwrap();
        assert_eq!(user.name, "Amina");
        assert_eq!(user.phone, "+2348012345678");
        assert_eq!(user.lga, "Kano");
        assert_eq!(user.personality, Personality::CaringNeighbor);
    }

    #[test]
    fn register_accepts_a_personality_key() {
        let service = setup_test();
        let user = service
            .register("Amina", "+2348012345678", "Kano", Some("community_nurse"))
            .unwrap();
        assert_eq!(user.personality, Personality::CommunityNurse);
    }

    #[test]
    fn register_rejects_blank_fields() {
        let service = setup_test();
        assert!(service.register("  ", "+234", "Kano", None).is_err());
        assert!(service.register("Amina", "", "Kano", None).is_err());
        assert!(service.register("Amina", "+234", " ", None).is_err());
    }

    #[test]
    fn register_enforces_phone_uniqueness() {
        let service = setup_test();
        service
            .register("Amina", "+2348012345678", "Kano", None)
            .unwrap();
        let duplicate = service.register("Bola", "+2348012345678", "Lagos", None);
        assert!(duplicate.is_err());
    }

    #[test]
    fn update_personality_persists() {
        let service = setup_test();
        let user = service
            .register("Amina", "+2348012345678", "Kano", None)
            .unwrap();

        service.update_personality(&user.id, "market_aunty").unwrap();
        let loaded = service.get_user(&user.id).unwrap().unwrap();
        assert_eq!(loaded.personality, Personality::MarketAunty);
    }

    #[test]
    fn update_personality_for_missing_user_fails() {
        let service = setup_test();
        assert!(service.update_personality("ghost", "market_aunty").is_err());
    }
}
