//! Persistence Gateway
//!
//! The relational store is reached through two traits:
//!
//! - [`Gateway`] - a connection pool that opens transaction scopes
//! - [`GatewayTx`] - one open transaction; every read and write goes
//!   through it and nothing is visible to other requests until
//!   [`GatewayTx::commit`] succeeds
//!
//! Dropping a `GatewayTx` without committing rolls the transaction back, so
//! an early `?` return or an abandoned request never leaves a partial
//! mutation behind.
//!
//! # Relation sets
//!
//! A user's four relation sets are projections of two tables:
//!
//! - `friend_requests(sender_id, receiver_id)` - one row is both the
//!   sender's "sent" entry and the receiver's "received" entry
//! - `friendships(user_low, user_high)` - one row per unordered pair is both
//!   users' "my friends" and "friends of" entry
//!
//! # Backends
//!
//! - `postgres` - serializable transactions, pair transitions lock both
//!   user rows `FOR UPDATE`
//! - `sqlite` - a single-connection pool, so transactions never overlap

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::{Notification, NotificationType, UserStatus};

pub mod postgres;
pub mod sql;
pub mod sqlite;

pub use postgres::PgGateway;
pub use sqlite::SqliteGateway;

/// User row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// bcrypt hash, never serialized
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    /// `ACTIVE` or `INACTIVE`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn status(&self) -> UserStatus {
        UserStatus::from_str(&self.status).unwrap_or_default()
    }
}

/// Fields of a user to be created
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Scalar writes on a user; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub status: Option<UserStatus>,
}

/// Notification to be appended
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationType,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub content: String,
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: i64,
    kind: String,
    from_user_id: Uuid,
    to_user_id: Uuid,
    content: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = BackendError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationType::from_str(&row.kind)
            .ok_or_else(|| BackendError::internal(format!("unknown notification kind {}", row.kind)))?;
        Ok(Notification {
            id: row.id,
            kind,
            from_user_id: row.from_user_id,
            to_user_id: row.to_user_id,
            content: row.content,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

/// Orders a pair the way `friendships` stores it
pub fn friendship_key(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Storage errors that a fresh transaction may get past: serialization
/// failures, deadlocks, unique violations from a concurrent insert of the
/// same edge, and a busy or locked SQLite database
pub fn is_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                || matches!(
                    db_err.code().as_deref(),
                    Some("40001" | "40P01" | "5" | "6" | "517")
                )
        }
        _ => false,
    }
}

/// Connection pool side of the gateway
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Open a transaction scope
    async fn begin(&self) -> BackendResult<Box<dyn GatewayTx>>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Shared handle stored in the application state
pub type SharedGateway = Arc<dyn Gateway>;

/// One open transaction
#[async_trait]
pub trait GatewayTx: Send {
    async fn find_user(&mut self, id: Uuid) -> BackendResult<Option<User>>;

    async fn find_user_by_email(&mut self, email: &str) -> BackendResult<Option<User>>;

    /// Load both users of a pair, holding a write lock on their rows until
    /// the transaction ends. Missing users are absent from the result.
    async fn lock_users(&mut self, a: Uuid, b: Uuid) -> BackendResult<Vec<User>>;

    async fn create_user(&mut self, user: NewUser) -> BackendResult<User>;

    async fn update_user(&mut self, id: Uuid, update: UserUpdate) -> BackendResult<Option<User>>;

    /// Is there a pending request `sender -> receiver`
    async fn request_exists(&mut self, sender: Uuid, receiver: Uuid) -> BackendResult<bool>;

    async fn friendship_exists(&mut self, a: Uuid, b: Uuid) -> BackendResult<bool>;

    async fn connect_request(&mut self, sender: Uuid, receiver: Uuid) -> BackendResult<()>;

    /// Returns false when there was nothing to remove
    async fn disconnect_request(&mut self, sender: Uuid, receiver: Uuid) -> BackendResult<bool>;

    async fn connect_friendship(&mut self, a: Uuid, b: Uuid) -> BackendResult<()>;

    /// Returns false when there was nothing to remove
    async fn disconnect_friendship(&mut self, a: Uuid, b: Uuid) -> BackendResult<bool>;

    /// Friends of a user, optionally only the first `limit`
    async fn friends_of(&mut self, user: Uuid, limit: Option<i64>) -> BackendResult<Vec<User>>;

    async fn friend_count(&mut self, user: Uuid) -> BackendResult<i64>;

    /// Users the given user has pending requests out to
    async fn sent_requests(&mut self, user: Uuid) -> BackendResult<Vec<User>>;

    /// Users with pending requests out to the given user
    async fn received_requests(&mut self, user: Uuid) -> BackendResult<Vec<User>>;

    /// Users unrelated to the given user
    async fn suggestion_candidates(&mut self, user: Uuid) -> BackendResult<Vec<User>>;

    async fn create_notification(&mut self, notification: NewNotification) -> BackendResult<Notification>;

    /// Notifications addressed to a user, newest first
    async fn notifications_for(&mut self, user: Uuid) -> BackendResult<Vec<Notification>>;

    /// Returns false when the notification does not exist or belongs to
    /// someone else
    async fn mark_notification_read(&mut self, id: i64, user: Uuid) -> BackendResult<bool>;

    async fn commit(self: Box<Self>) -> BackendResult<()>;
}

/// Implements [`GatewayTx`] for a backend transaction wrapper.
///
/// The wrapper must hold its `sqlx::Transaction` in a field named `tx`.
/// Only the pair lock differs between backends and is passed in.
macro_rules! impl_gateway_tx {
    ($tx_type:ty, lock_users = $lock_sql:expr) => {
        #[async_trait::async_trait]
        impl $crate::backend::gateway::GatewayTx for $tx_type {
            async fn find_user(
                &mut self,
                id: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<Option<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::FIND_USER)
                    .bind(id)
                    .fetch_optional(&mut *self.tx)
                    .await?)
            }

            async fn find_user_by_email(
                &mut self,
                email: &str,
            ) -> $crate::backend::error::BackendResult<Option<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::FIND_USER_BY_EMAIL)
                    .bind(email)
                    .fetch_optional(&mut *self.tx)
                    .await?)
            }

            async fn lock_users(
                &mut self,
                a: uuid::Uuid,
                b: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<Vec<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::User;
                Ok(sqlx::query_as::<_, User>($lock_sql)
                    .bind(a)
                    .bind(b)
                    .fetch_all(&mut *self.tx)
                    .await?)
            }

            async fn create_user(
                &mut self,
                user: $crate::backend::gateway::NewUser,
            ) -> $crate::backend::error::BackendResult<$crate::backend::gateway::User> {
                use $crate::backend::gateway::{sql, User};
                use $crate::shared::UserStatus;
                Ok(sqlx::query_as::<_, User>(sql::INSERT_USER)
                    .bind(uuid::Uuid::new_v4())
                    .bind(user.first_name)
                    .bind(user.last_name)
                    .bind(user.email)
                    .bind(user.password_hash)
                    .bind(UserStatus::Inactive.as_str())
                    .bind(chrono::Utc::now())
                    .fetch_one(&mut *self.tx)
                    .await?)
            }

            async fn update_user(
                &mut self,
                id: uuid::Uuid,
                update: $crate::backend::gateway::UserUpdate,
            ) -> $crate::backend::error::BackendResult<Option<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::UPDATE_USER)
                    .bind(id)
                    .bind(update.profile_image)
                    .bind(update.cover_image)
                    .bind(update.status.map(|status| status.as_str()))
                    .bind(chrono::Utc::now())
                    .fetch_optional(&mut *self.tx)
                    .await?)
            }

            async fn request_exists(
                &mut self,
                sender: uuid::Uuid,
                receiver: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<bool> {
                let count: i64 = sqlx::query_scalar($crate::backend::gateway::sql::REQUEST_EXISTS)
                    .bind(sender)
                    .bind(receiver)
                    .fetch_one(&mut *self.tx)
                    .await?;
                Ok(count > 0)
            }

            async fn friendship_exists(
                &mut self,
                a: uuid::Uuid,
                b: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<bool> {
                let (low, high) = $crate::backend::gateway::friendship_key(a, b);
                let count: i64 = sqlx::query_scalar($crate::backend::gateway::sql::FRIENDSHIP_EXISTS)
                    .bind(low)
                    .bind(high)
                    .fetch_one(&mut *self.tx)
                    .await?;
                Ok(count > 0)
            }

            async fn connect_request(
                &mut self,
                sender: uuid::Uuid,
                receiver: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<()> {
                sqlx::query($crate::backend::gateway::sql::INSERT_REQUEST)
                    .bind(sender)
                    .bind(receiver)
                    .bind(chrono::Utc::now())
                    .execute(&mut *self.tx)
                    .await?;
                Ok(())
            }

            async fn disconnect_request(
                &mut self,
                sender: uuid::Uuid,
                receiver: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<bool> {
                let result = sqlx::query($crate::backend::gateway::sql::DELETE_REQUEST)
                    .bind(sender)
                    .bind(receiver)
                    .execute(&mut *self.tx)
                    .await?;
                Ok(result.rows_affected() > 0)
            }

            async fn connect_friendship(
                &mut self,
                a: uuid::Uuid,
                b: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<()> {
                let (low, high) = $crate::backend::gateway::friendship_key(a, b);
                sqlx::query($crate::backend::gateway::sql::INSERT_FRIENDSHIP)
                    .bind(low)
                    .bind(high)
                    .bind(chrono::Utc::now())
                    .execute(&mut *self.tx)
                    .await?;
                Ok(())
            }

            async fn disconnect_friendship(
                &mut self,
                a: uuid::Uuid,
                b: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<bool> {
                let (low, high) = $crate::backend::gateway::friendship_key(a, b);
                let result = sqlx::query($crate::backend::gateway::sql::DELETE_FRIENDSHIP)
                    .bind(low)
                    .bind(high)
                    .execute(&mut *self.tx)
                    .await?;
                Ok(result.rows_affected() > 0)
            }

            async fn friends_of(
                &mut self,
                user: uuid::Uuid,
                limit: Option<i64>,
            ) -> $crate::backend::error::BackendResult<Vec<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::FRIENDS_OF)
                    .bind(user)
                    .bind(limit.unwrap_or(i64::MAX))
                    .fetch_all(&mut *self.tx)
                    .await?)
            }

            async fn friend_count(
                &mut self,
                user: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<i64> {
                Ok(sqlx::query_scalar($crate::backend::gateway::sql::FRIEND_COUNT)
                    .bind(user)
                    .fetch_one(&mut *self.tx)
                    .await?)
            }

            async fn sent_requests(
                &mut self,
                user: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<Vec<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::SENT_REQUESTS)
                    .bind(user)
                    .fetch_all(&mut *self.tx)
                    .await?)
            }

            async fn received_requests(
                &mut self,
                user: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<Vec<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::RECEIVED_REQUESTS)
                    .bind(user)
                    .fetch_all(&mut *self.tx)
                    .await?)
            }

            async fn suggestion_candidates(
                &mut self,
                user: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<Vec<$crate::backend::gateway::User>> {
                use $crate::backend::gateway::{sql, User};
                Ok(sqlx::query_as::<_, User>(sql::SUGGESTION_CANDIDATES)
                    .bind(user)
                    .fetch_all(&mut *self.tx)
                    .await?)
            }

            async fn create_notification(
                &mut self,
                notification: $crate::backend::gateway::NewNotification,
            ) -> $crate::backend::error::BackendResult<$crate::shared::Notification> {
                let row = sqlx::query_as::<_, $crate::backend::gateway::NotificationRow>(
                    $crate::backend::gateway::sql::INSERT_NOTIFICATION,
                )
                .bind(notification.kind.as_str())
                .bind(notification.from_user_id)
                .bind(notification.to_user_id)
                .bind(notification.content)
                .bind(chrono::Utc::now())
                .fetch_one(&mut *self.tx)
                .await?;
                row.try_into()
            }

            async fn notifications_for(
                &mut self,
                user: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<Vec<$crate::shared::Notification>> {
                let rows = sqlx::query_as::<_, $crate::backend::gateway::NotificationRow>(
                    $crate::backend::gateway::sql::NOTIFICATIONS_FOR,
                )
                .bind(user)
                .fetch_all(&mut *self.tx)
                .await?;
                rows.into_iter().map(TryInto::try_into).collect()
            }

            async fn mark_notification_read(
                &mut self,
                id: i64,
                user: uuid::Uuid,
            ) -> $crate::backend::error::BackendResult<bool> {
                let result = sqlx::query($crate::backend::gateway::sql::MARK_NOTIFICATION_READ)
                    .bind(id)
                    .bind(user)
                    .execute(&mut *self.tx)
                    .await?;
                Ok(result.rows_affected() > 0)
            }

            async fn commit(self: Box<Self>) -> $crate::backend::error::BackendResult<()> {
                self.tx.commit().await?;
                Ok(())
            }
        }
    };
}

pub(crate) use impl_gateway_tx;
