//! Session credential and cached user identity.

use fieldguide_core::User;
use fieldguide_fetch::header::{COOKIE, HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::kv::{KeyValueStore, MemoryStore};

/// Key holding the cached user as JSON.
pub const USER_DATA_KEY: &str = "userData";

/// Key holding the user id as a decimal string.
pub const USER_ID_KEY: &str = "userId";

/// Key holding the raw `set-cookie` value from login.
pub const SESSION_COOKIE_KEY: &str = "sessionCookie";

/// Every key owned by the session, cleared together.
pub const SESSION_KEYS: [&str; 3] = [USER_DATA_KEY, USER_ID_KEY, SESSION_COOKIE_KEY];

/// Owns the session cookie and the cached user.
///
/// A session is active while a cached user is present.
#[derive(Debug, Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates a session store over `backend`.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Creates a session store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The stored cookie, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    pub async fn session_cookie(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .backend
            .get(SESSION_COOKIE_KEY)
            .await?
            .filter(|c| !c.is_empty()))
    }

    /// Stores a cookie, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    pub async fn save_session_cookie(&self, cookie: &str) -> Result<(), StoreError> {
        self.backend
            .multi_set(&[(SESSION_COOKIE_KEY, cookie.to_string())])
            .await?;
        debug!("Session cookie saved");
        Ok(())
    }

    /// The cached user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored user is not valid JSON.
    pub async fn user(&self) -> Result<Option<User>, StoreError> {
        match self.backend.get(USER_DATA_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|_| StoreError::Corrupt(USER_DATA_KEY.to_string())),
            None => Ok(None),
        }
    }

    /// The cached user id, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored id is not a number.
    pub async fn user_id(&self) -> Result<Option<i64>, StoreError> {
        match self.backend.get(USER_ID_KEY).await? {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| StoreError::Corrupt(USER_ID_KEY.to_string())),
            None => Ok(None),
        }
    }

    /// Caches the user and its id, with the cookie when one was issued.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    pub async fn save_login(&self, user: &User, cookie: Option<&str>) -> Result<(), StoreError> {
        let mut entries = vec![
            (USER_DATA_KEY, serde_json::to_string(user)?),
            (USER_ID_KEY, user.uid.to_string()),
        ];
        if let Some(cookie) = cookie {
            entries.push((SESSION_COOKIE_KEY, cookie.to_string()));
        }
        self.backend.multi_set(&entries).await?;
        info!(uid = user.uid, "Session stored");
        Ok(())
    }

    /// Removes the cookie, the cached user and the user id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.multi_remove(&SESSION_KEYS).await?;
        info!("Session cleared");
        Ok(())
    }

    /// Returns true while a cached user is present.
    ///
    /// A backend failure or an unreadable entry counts as no session.
    pub async fn has_session(&self) -> bool {
        match self.user().await {
            Ok(user) => user.is_some(),
            Err(e) => {
                warn!(error = %e, "Could not read session");
                false
            }
        }
    }

    /// Adds `Cookie: <credential>` to `headers` when a cookie is stored.
    ///
    /// Applying it twice gives the same headers as applying it once. Headers
    /// are returned untouched when there is no cookie or it cannot be read.
    pub async fn attach_session_header(&self, mut headers: HeaderMap) -> HeaderMap {
        let cookie = match self.session_cookie().await {
            Ok(Some(cookie)) => cookie,
            Ok(None) => return headers,
            Err(e) => {
                warn!(error = %e, "Could not read session cookie");
                return headers;
            }
        };

        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.insert(COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Stored session cookie is not a valid header value"),
        }
        headers
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            uid: 7,
            name: "Ana Pérez".to_string(),
            username: "ana@example.com".to_string(),
            partner_id: 12,
            company_id: 1,
        }
    }

    #[tokio::test]
    async fn test_attach_without_cookie_leaves_headers() {
        let store = SessionStore::in_memory();
        let headers = store.attach_session_header(HeaderMap::new()).await;
        assert!(headers.is_empty());
    }

    #[tokio::test]
    async fn test_attach_is_idempotent() {
        let store = SessionStore::in_memory();
        store.save_session_cookie("session_id=abc").await.unwrap();

        let once = store.attach_session_header(HeaderMap::new()).await;
        let twice = store.attach_session_header(once.clone()).await;

        assert_eq!(once, twice);
        assert_eq!(twice.get_all(COOKIE).iter().count(), 1);
        assert_eq!(twice[COOKIE], "session_id=abc");
    }

    #[tokio::test]
    async fn test_save_overwrites_cookie() {
        let store = SessionStore::in_memory();
        store.save_session_cookie("session_id=old").await.unwrap();
        store.save_session_cookie("session_id=new").await.unwrap();
        assert_eq!(
            store.session_cookie().await.unwrap().as_deref(),
            Some("session_id=new")
        );
    }

    #[tokio::test]
    async fn test_login_then_clear() {
        let store = SessionStore::in_memory();
        assert!(!store.has_session().await);

        store.save_login(&user(), Some("session_id=abc")).await.unwrap();
        assert!(store.has_session().await);
        assert_eq!(store.user_id().await.unwrap(), Some(7));
        assert_eq!(store.user().await.unwrap(), Some(user()));

        store.clear().await.unwrap();
        assert!(!store.has_session().await);
        assert_eq!(store.user_id().await.unwrap(), None);
        assert_eq!(store.session_cookie().await.unwrap(), None);
        assert!(store.attach_session_header(HeaderMap::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_user_counts_as_logged_out() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .multi_set(&[(USER_DATA_KEY, "{not json".to_string())])
            .await
            .unwrap();
        let store = SessionStore::new(backend);

        assert!(matches!(store.user().await, Err(StoreError::Corrupt(_))));
        assert!(!store.has_session().await);
    }
}
