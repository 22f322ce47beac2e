/**
 * User Model and Database Operations
 *
 * This module handles user records and their two queries: lookup by exact
 * username and insert.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite, SqlitePool};

/// Access tier of a user.
///
/// Decided once at registration and stored with the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Judge,
}

impl Role {
    /// Role granted to a newly registered username.
    ///
    /// Only an exact match with the configured admin username is an admin.
    pub fn for_new_user(username: &str, admin_username: &str) -> Self {
        if username == admin_username {
            Role::Admin
        } else {
            Role::Judge
        }
    }
}

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row id
    pub id: i64,
    /// Username (unique, matched exactly)
    pub username: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Access tier
    pub role: Role,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Create a new user
///
/// Generic over the executor so registration can run it inside a
/// transaction.
///
/// # Arguments
/// * `executor` - Pool, connection or transaction
/// * `username` - Chosen username, stored as given
/// * `password_hash` - bcrypt hash of the password
/// * `role` - Access tier
///
/// # Returns
/// Created user, or the database error (a unique violation when the
/// username is taken)
pub async fn create_user<'e, E>(
    executor: E,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, role, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, username, password_hash, role, created_at
        "#
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// The comparison is exact: case-sensitive and without trimming.
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, role, created_at
        FROM users
        WHERE username = ?
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
