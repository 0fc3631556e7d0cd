use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::database::entities::system_settings;
use crate::errors::DirectoryResult;

/// Settings key under which a generated API key is persisted.
const API_KEY_SETTING: &str = "API_KEY";

/// An API key together with whether this call created it.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedKey {
    pub api_key: String,
    pub created: bool,
}

/// Single-shared-key authentication. A key configured via the environment
/// always wins; otherwise one is generated once and persisted in the
/// system_settings table.
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generate a fresh API key: 64 hex characters of uuid-derived randomness.
    pub fn generate_api_key() -> String {
        format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        )
    }

    /// Compare a candidate against the expected key.
    ///
    /// Both sides are hashed first so the comparison does not leak length
    /// or common-prefix timing.
    pub fn verify(candidate: &str, expected: &str) -> bool {
        Sha256::digest(candidate.as_bytes()) == Sha256::digest(expected.as_bytes())
    }

    /// The key requests are checked against: the configured one when
    /// present, otherwise whatever has been persisted. `None` means no key
    /// has been issued yet.
    pub async fn effective_api_key(
        &self,
        configured: Option<&str>,
    ) -> DirectoryResult<Option<String>> {
        if let Some(key) = configured {
            return Ok(Some(key.to_string()));
        }

        let stored = self.stored_api_key().await?;
        Ok(stored)
    }

    /// Return the active API key, generating and persisting one on first use.
    pub async fn get_or_create_api_key(
        &self,
        configured: Option<&str>,
    ) -> DirectoryResult<IssuedKey> {
        if let Some(key) = configured {
            return Ok(IssuedKey {
                api_key: key.to_string(),
                created: false,
            });
        }

        if let Some(key) = self.stored_api_key().await? {
            return Ok(IssuedKey {
                api_key: key,
                created: false,
            });
        }

        let key = Self::generate_api_key();
        let setting = system_settings::ActiveModel {
            key: Set(API_KEY_SETTING.to_string()),
            value: Set(key.clone()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        setting.insert(&self.db).await?;

        tracing::info!("Generated a new API key");
        Ok(IssuedKey {
            api_key: key,
            created: true,
        })
    }

    async fn stored_api_key(&self) -> DirectoryResult<Option<String>> {
        let setting = system_settings::Entity::find()
            .filter(system_settings::Column::Key.eq(API_KEY_SETTING))
            .one(&self.db)
            .await?;

        Ok(setting.map(|row| row.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_long_and_distinct() {
        let a = AuthService::generate_api_key();
        let b = AuthService::generate_api_key();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn verify_accepts_equal_and_rejects_different() {
        assert!(AuthService::verify("secret", "secret"));
        assert!(!AuthService::verify("secret", "other"));
        assert!(!AuthService::verify("secret", "secret2"));
    }
}
