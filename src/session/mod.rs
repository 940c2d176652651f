//! Client-side pseudo-session: the bearer token, the role and the cached user
//! profile, persisted under the same keys the browser build used.
//!
//! Nothing here is a security boundary. The role is stored as its plain
//! value and the profile is base64-wrapped JSON; the backend validates the
//! token on every request.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::policy::{self, Access, Role};
use crate::storage::Storage;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_ROLE_KEY: &str = "userRoleToken";
pub const USER_DATA_KEY: &str = "userData";

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn set_auth_token(&self, token: &str) -> Result<(), AppError> {
        self.storage.set_item(AUTH_TOKEN_KEY, token).await
    }

    /// Empty when nobody is signed in.
    pub async fn get_auth_token(&self) -> Result<String, AppError> {
        Ok(self
            .storage
            .get_item(AUTH_TOKEN_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_user_role(&self, role: &str) -> Result<(), AppError> {
        self.storage.set_item(USER_ROLE_KEY, role).await
    }

    pub async fn get_user_role(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .storage
            .get_item(USER_ROLE_KEY)
            .await?
            .filter(|role| !role.is_empty()))
    }

    pub async fn set_user_data(&self, user: &UserProfile) -> Result<(), AppError> {
        let json = serde_json::to_vec(user)?;
        self.storage
            .set_item(USER_DATA_KEY, &STANDARD.encode(json))
            .await
    }

    /// A blob that fails to decode reads as "no profile".
    pub async fn get_user_data(&self) -> Result<Option<UserProfile>, AppError> {
        let Some(encoded) = self.storage.get_item(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        Ok(decode_user_data(&encoded))
    }

    pub async fn clear_auth_data(&self) -> Result<(), AppError> {
        self.storage.remove_item(AUTH_TOKEN_KEY).await?;
        self.storage.remove_item(USER_ROLE_KEY).await?;
        self.storage.remove_item(USER_DATA_KEY).await?;
        Ok(())
    }

    /// Persists everything a successful login returns.
    pub async fn store_login(&self, token: &str, user: &UserProfile) -> Result<(), AppError> {
        self.set_auth_token(token).await?;
        self.set_user_data(user).await?;
        self.set_user_role(&user.role).await?;
        Ok(())
    }

    pub async fn load_context(&self) -> Result<SessionContext, AppError> {
        let token = Some(self.get_auth_token().await?).filter(|t| !t.is_empty());
        let role = self.get_user_role().await?.map(|r| Role::parse(&r));
        let user = self.get_user_data().await?;
        Ok(SessionContext { token, role, user })
    }
}

fn decode_user_data(encoded: &str) -> Option<UserProfile> {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("stored user data is not base64: {}", e);
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(user) => Some(user),
        Err(e) => {
            debug!("stored user data is not a user profile: {}", e);
            None
        }
    }
}

/// Snapshot of the stored session, taken when a page mounts and handed to
/// the page explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub user: Option<UserProfile>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.role.is_some()
    }

    pub fn authorize(&self, required: Option<&Role>) -> Access {
        policy::authorize(self.token.as_deref(), self.role.as_ref(), required)
    }

    pub fn home_path(&self) -> Option<&'static str> {
        self.role.as_ref().map(policy::resolve_home_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), SessionStore::new(storage))
    }

    fn ada() -> UserProfile {
        UserProfile {
            id: "7".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[tokio::test]
    async fn missing_token_reads_empty() {
        let (_, store) = store();
        assert_eq!(store.get_auth_token().await.unwrap(), "");
        assert_eq!(store.get_user_role().await.unwrap(), None);
        assert_eq!(store.get_user_data().await.unwrap(), None);
    }

    #[tokio::test]
    async fn login_round_trip_and_clear() {
        let (storage, store) = store();
        store.store_login("tok-1", &ada()).await.unwrap();

        assert_eq!(
            storage.get_item(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("tok-1")
        );
        let ctx = store.load_context().await.unwrap();
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.role, Some(Role::Admin));
        assert_eq!(ctx.user, Some(ada()));
        assert_eq!(ctx.home_path(), Some("/admin"));

        store.clear_auth_data().await.unwrap();
        assert_eq!(store.load_context().await.unwrap(), SessionContext::default());
    }

    #[tokio::test]
    async fn user_data_is_base64_json() {
        let (storage, store) = store();
        store.set_user_data(&ada()).await.unwrap();

        let raw = storage.get_item(USER_DATA_KEY).await.unwrap().unwrap();
        let decoded: serde_json::Value =
            serde_json::from_slice(&STANDARD.decode(raw).unwrap()).unwrap();
        assert_eq!(decoded["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn corrupt_user_data_reads_as_none() {
        let (storage, store) = store();
        let blobs = vec![
            "%%%not-base64%%%".to_string(),
            STANDARD.encode("not json"),
            STANDARD.encode("{\"id\":1}"),
            STANDARD.encode([0xff, 0xfe, 0x00]),
        ];
        for raw in &blobs {
            storage.set_item(USER_DATA_KEY, raw).await.unwrap();
            assert_eq!(store.get_user_data().await.unwrap(), None, "raw = {raw}");
        }
    }

    proptest! {
        #[test]
        fn role_round_trips(role in "[ -~]{1,32}") {
            let (_, store) = store();
            let stored = block_on(async {
                store.set_user_role(&role).await.unwrap();
                store.get_user_role().await.unwrap()
            });
            prop_assert_eq!(stored, Some(role));
        }

        #[test]
        fn arbitrary_user_data_never_errors(raw in ".*") {
            let (storage, store) = store();
            let result = block_on(async {
                storage.set_item(USER_DATA_KEY, &raw).await.unwrap();
                store.get_user_data().await
            });
            prop_assert!(result.is_ok());
        }
    }
}
