//! In-memory identity directory backed by the token codec.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::BearerToken;
use crate::identity::{
    domain::{Role, UserId, UserProfile},
    ports::{DirectoryError, DirectoryResult, IdentityDirectory},
    services::{TokenCodec, TokenError},
};

/// Thread-safe in-memory identity directory.
///
/// Verifies tokens through the codec and resolves the subject against a
/// registered profile table. Stands in for the identity service in tests
/// and single-process deployments.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityDirectory {
    codec: TokenCodec,
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryIdentityDirectory {
    /// Creates an empty directory over the given codec.
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            codec,
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a profile, replacing any existing one for the same id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the profile table lock
    /// is poisoned.
    pub fn register(&self, profile: UserProfile) -> DirectoryResult<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        profiles.insert(profile.id().clone(), profile);
        Ok(())
    }

    /// Issues a bearer token for a registered user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UnknownSubject`] when the user is not
    /// registered, or a token error when signing fails.
    pub fn issue_token(&self, user_id: &UserId) -> DirectoryResult<BearerToken> {
        let role = {
            let profiles = self.profiles.read().map_err(|err| {
                DirectoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            profiles
                .get(user_id)
                .map(UserProfile::role)
                .ok_or_else(|| DirectoryError::UnknownSubject(user_id.clone()))?
        };
        let token = self.codec.issue(user_id, role)?;
        Ok(BearerToken::new(token))
    }

    /// Registers a profile and issues a token for it in one step.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when registration or issuance fails.
    pub fn register_with_token(
        &self,
        id: impl Into<String>,
        role: Role,
        display_name: &str,
        email: &str,
    ) -> DirectoryResult<(UserId, BearerToken)> {
        let user_id = UserId::new(id);
        self.register(UserProfile::new(
            user_id.clone(),
            role,
            display_name,
            email,
        ))?;
        let token = self.issue_token(&user_id)?;
        Ok((user_id, token))
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn resolve_profile(&self, token: &BearerToken) -> DirectoryResult<UserProfile> {
        let claims = self.codec.verify(token.as_str())?;
        let subject = claims.user_id();
        // The role claim must parse even though the stored profile wins;
        // a token with a mangled role claim is not a valid credential.
        claims.parsed_role().map_err(TokenError::UnknownRole)?;

        let profiles = self
            .profiles
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        profiles
            .get(&subject)
            .cloned()
            .ok_or(DirectoryError::UnknownSubject(subject))
    }

    async fn list_profiles(&self) -> DirectoryResult<Vec<UserProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(profiles.values().cloned().collect())
    }
}
