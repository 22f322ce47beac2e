/**
 * Credential Authenticator
 *
 * Login, registration and logout, independent of HTTP extraction. Each
 * operation returns the redirect the client should follow; expected
 * failures (wrong password, taken username) are redirects with a message,
 * while database and hashing failures are `BackendError`s.
 *
 * # State machine (per client session)
 *
 * ```text
 * Anonymous --login ok--> Authenticated(username) --logout--> Anonymous
 * ```
 *
 * A failed login leaves the session untouched.
 */

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::AuthRedirect;
use crate::backend::auth::password::{hash_password, verify_password};
use crate::backend::auth::sessions::Session;
use crate::backend::auth::users::{create_user, get_user_by_username, Role, User};
use crate::backend::error::BackendError;
use crate::shared::AppConfig;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const MSG_USERNAME_EXISTS: &str = "Username already exists";
pub const MSG_REGISTERED: &str = "Registered successfully";

/// Where each kind of redirect goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPaths {
    pub home: String,
    pub admin: String,
    pub judge: String,
}

impl LandingPaths {
    /// Post-login destination for a role
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin,
            Role::Judge => &self.judge,
        }
    }
}

#[derive(Debug)]
struct Settings {
    paths: LandingPaths,
    admin_username: String,
    bcrypt_cost: u32,
}

/// Username/password authenticator backed by the `users` table
#[derive(Clone, Debug)]
pub struct Authenticator {
    pool: SqlitePool,
    settings: Arc<Settings>,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            pool,
            settings: Arc::new(Settings {
                paths: LandingPaths {
                    home: config.home_path.clone(),
                    admin: config.admin_path.clone(),
                    judge: config.judge_path.clone(),
                },
                admin_username: config.admin_username.clone(),
                bcrypt_cost: config.bcrypt_cost,
            }),
        }
    }

    pub fn paths(&self) -> &LandingPaths {
        &self.settings.paths
    }

    /// Look up `username` and check `password` against its hash.
    ///
    /// Returns the user only when both succeed. An unknown username is
    /// `Ok(None)`, same as a wrong password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, BackendError> {
        let Some(user) = get_user_by_username(&self.pool, username).await? else {
            tracing::warn!("Login failed, user not found: {}", username);
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!("Login failed, invalid password for user: {}", username);
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// True only when `username` exists and `password` matches.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, BackendError> {
        Ok(self.authenticate(username, password).await?.is_some())
    }

    /// Log in and pick the landing path by role.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<AuthRedirect, BackendError> {
        let paths = &self.settings.paths;

        match self.authenticate(username, password).await? {
            Some(user) => {
                session.set_user(&user.username).await;
                tracing::info!("User logged in: {} ({:?})", user.username, user.role);
                Ok(AuthRedirect::to(paths.for_role(user.role))
                    .with_cookie(session.set_cookie_header()))
            }
            None => Ok(AuthRedirect::with_message(&paths.home, MSG_INVALID_CREDENTIALS)),
        }
    }

    /// Register a new user.
    ///
    /// The existence check and the insert are separate statements. A
    /// concurrent registration that wins the race trips the UNIQUE
    /// constraint, which is reported the same way as the pre-check.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthRedirect, BackendError> {
        let home = &self.settings.paths.home;

        if get_user_by_username(&self.pool, username).await?.is_some() {
            tracing::warn!("Username already exists: {}", username);
            return Ok(AuthRedirect::with_message(home, MSG_USERNAME_EXISTS));
        }

        let password_hash = hash_password(password, self.settings.bcrypt_cost)?;
        let role = Role::for_new_user(username, &self.settings.admin_username);

        let mut tx = self.pool.begin().await?;
        let user = match create_user(&mut *tx, username, &password_hash, role).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::warn!("Username taken by concurrent registration: {}", username);
                return Ok(AuthRedirect::with_message(home, MSG_USERNAME_EXISTS));
            }
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;

        tracing::info!("User registered: {} ({:?})", user.username, user.role);
        Ok(AuthRedirect::with_message(home, MSG_REGISTERED))
    }

    /// Clear the session and go home.
    pub async fn logout(&self, session: &mut Session) -> AuthRedirect {
        if let Some(user) = session.user() {
            tracing::info!("User logged out: {}", user);
        }
        session.clear().await;
        AuthRedirect::to(self.settings.paths.home.clone()).with_cookie(session.set_cookie_header())
    }

    /// User behind the session, if it is authenticated and still exists
    pub async fn current_user(&self, session: &Session) -> Result<Option<User>, BackendError> {
        match session.user() {
            Some(username) => Ok(get_user_by_username(&self.pool, username).await?),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::SessionStore;
    use crate::backend::server::config::connect_database;
    use pretty_assertions::assert_eq;

    async fn setup() -> (Authenticator, SessionStore, SqlitePool) {
        let config = AppConfig::builder()
            .database_url("sqlite::memory:")
            .bcrypt_cost(4)
            .build()
            .unwrap();
        let pool = connect_database(&config).await.unwrap();
        let store = SessionStore::from_config(&config);
        (Authenticator::new(pool.clone(), &config), store, pool)
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let (auth, _, _) = setup().await;
        auth.register("alice", "pw1").await.unwrap();

        assert!(auth.verify_credentials("alice", "pw1").await.unwrap());
        assert!(!auth.verify_credentials("alice", "pw2").await.unwrap());
        assert!(!auth.verify_credentials("ALICE", "pw1").await.unwrap());
        assert!(!auth.verify_credentials("nobody", "pw1").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_success_message() {
        let (auth, _, pool) = setup().await;
        let redirect = auth.register("alice", "pw1").await.unwrap();

        assert_eq!(redirect.message(), Some(MSG_REGISTERED));
        assert_eq!(redirect.location(), "/?msg=Registered%20successfully");
        assert_eq!(redirect.set_cookie(), None);

        let user = get_user_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert_eq!(user.role, Role::Judge);
    }

    #[tokio::test]
    async fn test_register_duplicate_keeps_original_hash() {
        let (auth, _, pool) = setup().await;
        auth.register("alice", "pw1").await.unwrap();
        let original = get_user_by_username(&pool, "alice").await.unwrap().unwrap();

        let redirect = auth.register("alice", "pw2").await.unwrap();
        assert_eq!(redirect.message(), Some(MSG_USERNAME_EXISTS));

        let after = get_user_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(after.password_hash, original.password_hash);
        assert!(auth.verify_credentials("alice", "pw1").await.unwrap());
        assert!(!auth.verify_credentials("alice", "pw2").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_accepts_empty_strings() {
        let (auth, _, _) = setup().await;
        let redirect = auth.register("", "").await.unwrap();
        assert_eq!(redirect.message(), Some(MSG_REGISTERED));
        assert!(auth.verify_credentials("", "").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_admin_gets_admin_role() {
        let (auth, _, pool) = setup().await;
        auth.register("admin", "secret").await.unwrap();

        let admin = get_user_by_username(&pool, "admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_admin_redirects_to_admin_path() {
        let (auth, store, _) = setup().await;
        auth.register("admin", "secret").await.unwrap();

        let mut session = Session::load(store.clone(), None).await;
        let redirect = auth.login(&mut session, "admin", "secret").await.unwrap();

        assert_eq!(redirect.location(), "/admin");
        assert_eq!(session.user(), Some("admin"));
        assert!(redirect.set_cookie().is_some());
        let id = session.id().unwrap();
        assert_eq!(store.load(id).await.unwrap().user.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_login_other_user_redirects_to_judge_path() {
        let (auth, store, _) = setup().await;
        auth.register("alice", "pw1").await.unwrap();

        let mut session = Session::load(store, None).await;
        let redirect = auth.login(&mut session, "alice", "pw1").await.unwrap();

        assert_eq!(redirect.location(), "/judge");
        assert_eq!(session.user(), Some("alice"));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_unset() {
        let (auth, store, _) = setup().await;
        auth.register("alice", "pw1").await.unwrap();

        let mut session = Session::load(store.clone(), None).await;
        let redirect = auth.login(&mut session, "alice", "wrong").await.unwrap();
        assert_eq!(redirect.message(), Some(MSG_INVALID_CREDENTIALS));
        assert_eq!(
            redirect.location(),
            "/?msg=Invalid%20username%20or%20password"
        );
        assert_eq!(redirect.set_cookie(), None);
        assert_eq!(session.user(), None);

        let redirect = auth.login(&mut session, "ghost", "pw1").await.unwrap();
        assert_eq!(redirect.message(), Some(MSG_INVALID_CREDENTIALS));
        assert_eq!(session.user(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let (auth, store, _) = setup().await;
        auth.register("alice", "pw1").await.unwrap();

        let mut session = Session::load(store, None).await;
        auth.login(&mut session, "alice", "pw1").await.unwrap();
        let id = session.id();

        auth.login(&mut session, "alice", "nope").await.unwrap();
        assert_eq!(session.id(), id);
        assert_eq!(session.user(), Some("alice"));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (auth, store, _) = setup().await;
        auth.register("alice", "pw1").await.unwrap();

        let mut session = Session::load(store.clone(), None).await;
        auth.login(&mut session, "alice", "pw1").await.unwrap();
        let id = session.id().unwrap();

        let redirect = auth.logout(&mut session).await;
        assert_eq!(redirect.location(), "/");
        assert_eq!(redirect.message(), None);
        assert_eq!(session.user(), None);
        assert_eq!(store.load(id).await, None);
    }

    #[tokio::test]
    async fn test_logout_without_session() {
        let (auth, store, _) = setup().await;
        let mut session = Session::load(store, None).await;

        let redirect = auth.logout(&mut session).await;
        assert_eq!(redirect.location(), "/");
        assert_eq!(session.user(), None);
        assert!(redirect.set_cookie().unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_current_user() {
        let (auth, store, _) = setup().await;
        auth.register("alice", "pw1").await.unwrap();

        let mut session = Session::load(store, None).await;
        assert!(auth.current_user(&session).await.unwrap().is_none());

        auth.login(&mut session, "alice", "pw1").await.unwrap();
        let user = auth.current_user(&session).await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_malformed_stored_hash_is_error() {
        let (auth, _, pool) = setup().await;
        create_user(&pool, "broken", "not-a-hash", Role::Judge)
            .await
            .unwrap();

        let result = auth.verify_credentials("broken", "pw").await;
        assert!(matches!(result, Err(BackendError::PasswordHashError(_))));
    }

    #[tokio::test]
    async fn test_register_then_login_scenario() {
        let (auth, store, _) = setup().await;

        let first = auth.register("alice", "pw1").await.unwrap();
        assert_eq!(first.message(), Some(MSG_REGISTERED));

        let second = auth.register("alice", "pw2").await.unwrap();
        assert_eq!(second.message(), Some(MSG_USERNAME_EXISTS));

        let mut session = Session::load(store.clone(), None).await;
        let ok = auth.login(&mut session, "alice", "pw1").await.unwrap();
        assert_eq!(ok.location(), "/judge");
        assert_eq!(session.user(), Some("alice"));

        let mut fresh = Session::load(store, None).await;
        let bad = auth.login(&mut fresh, "alice", "pw2").await.unwrap();
        assert_eq!(bad.message(), Some(MSG_INVALID_CREDENTIALS));
        assert_eq!(fresh.user(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_single_winner() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("race.db");
        let config = AppConfig::builder()
            .database_url(format!("sqlite://{}", db_path.display()))
            .database_max_connections(8)
            .bcrypt_cost(4)
            .build()
            .unwrap();
        let pool = connect_database(&config).await.unwrap();
        let auth = Authenticator::new(pool.clone(), &config);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let auth = auth.clone();
                tokio::spawn(async move { auth.register("race", &format!("pw{i}")).await })
            })
            .collect();

        let mut messages = Vec::new();
        for handle in handles {
            let redirect = handle.await.unwrap().expect("registration must not error");
            messages.push(redirect.message().unwrap_or_default().to_string());
        }

        let winners = messages.iter().filter(|m| m.as_str() == MSG_REGISTERED).count();
        let losers = messages.iter().filter(|m| m.as_str() == MSG_USERNAME_EXISTS).count();
        assert_eq!(winners, 1);
        assert_eq!(losers, 7);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind("race")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_landing_paths_for_role() {
        let paths = LandingPaths {
            home: "/".to_string(),
            admin: "/a".to_string(),
            judge: "/j".to_string(),
        };
        assert_eq!(paths.for_role(Role::Admin), "/a");
        assert_eq!(paths.for_role(Role::Judge), "/j");
    }
}
