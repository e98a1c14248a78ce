//! SQL shared by the PostgreSQL and SQLite backends.
//!
//! Both drivers accept `$N` placeholders, so a statement is written once.
//! Backend-specific statements (row locking) live with their backend.

macro_rules! user_columns {
    () => {
        "u.id, u.first_name, u.last_name, u.email, u.password_hash, u.profile_image, \
         u.cover_image, u.status, u.created_at, u.updated_at"
    };
}

macro_rules! notification_columns {
    () => {
        "id, kind, from_user_id, to_user_id, content, is_read, created_at"
    };
}

/// Same columns without the table alias, for `RETURNING` clauses
macro_rules! returned_user_columns {
    () => {
        "id, first_name, last_name, email, password_hash, profile_image, \
         cover_image, status, created_at, updated_at"
    };
}

/// Sort order of every user list
macro_rules! user_order {
    () => {
        " ORDER BY u.first_name, u.last_name, u.id"
    };
}

pub const FIND_USER: &str = concat!("SELECT ", user_columns!(), " FROM users u WHERE u.id = $1");

pub const FIND_USER_BY_EMAIL: &str =
    concat!("SELECT ", user_columns!(), " FROM users u WHERE u.email = $1");

pub const INSERT_USER: &str = concat!(
    "INSERT INTO users (id, first_name, last_name, email, password_hash, status, created_at, updated_at) ",
    "VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING ",
    returned_user_columns!()
);

pub const UPDATE_USER: &str = concat!(
    "UPDATE users SET ",
    "profile_image = COALESCE($2, profile_image), ",
    "cover_image = COALESCE($3, cover_image), ",
    "status = COALESCE($4, status), ",
    "updated_at = $5 ",
    "WHERE id = $1 RETURNING ",
    returned_user_columns!()
);

pub const REQUEST_EXISTS: &str =
    "SELECT COUNT(*) FROM friend_requests WHERE sender_id = $1 AND receiver_id = $2";

pub const INSERT_REQUEST: &str =
    "INSERT INTO friend_requests (sender_id, receiver_id, created_at) VALUES ($1, $2, $3)";

pub const DELETE_REQUEST: &str =
    "DELETE FROM friend_requests WHERE sender_id = $1 AND receiver_id = $2";

/// Friendship rows are keyed by the ordered pair `(user_low, user_high)`
pub const FRIENDSHIP_EXISTS: &str =
    "SELECT COUNT(*) FROM friendships WHERE user_low = $1 AND user_high = $2";

pub const INSERT_FRIENDSHIP: &str =
    "INSERT INTO friendships (user_low, user_high, created_at) VALUES ($1, $2, $3)";

pub const DELETE_FRIENDSHIP: &str =
    "DELETE FROM friendships WHERE user_low = $1 AND user_high = $2";

pub const FRIENDS_OF: &str = concat!(
    "SELECT ",
    user_columns!(),
    " FROM users u WHERE u.id IN (",
    "SELECT user_high FROM friendships WHERE user_low = $1 ",
    "UNION SELECT user_low FROM friendships WHERE user_high = $1)",
    user_order!(),
    " LIMIT $2"
);

pub const FRIEND_COUNT: &str =
    "SELECT COUNT(*) FROM friendships WHERE user_low = $1 OR user_high = $1";

pub const SENT_REQUESTS: &str = concat!(
    "SELECT ",
    user_columns!(),
    " FROM users u JOIN friend_requests r ON r.receiver_id = u.id WHERE r.sender_id = $1",
    user_order!()
);

pub const RECEIVED_REQUESTS: &str = concat!(
    "SELECT ",
    user_columns!(),
    " FROM users u JOIN friend_requests r ON r.sender_id = u.id WHERE r.receiver_id = $1",
    user_order!()
);

/// Everyone except the user, their friends and anyone with a pending
/// request to or from them
pub const SUGGESTION_CANDIDATES: &str = concat!(
    "SELECT ",
    user_columns!(),
    " FROM users u WHERE u.id <> $1 ",
    "AND NOT EXISTS (SELECT 1 FROM friend_requests r WHERE ",
    "(r.sender_id = $1 AND r.receiver_id = u.id) OR (r.sender_id = u.id AND r.receiver_id = $1)) ",
    "AND NOT EXISTS (SELECT 1 FROM friendships f WHERE ",
    "(f.user_low = $1 AND f.user_high = u.id) OR (f.user_low = u.id AND f.user_high = $1))",
    user_order!()
);

pub const INSERT_NOTIFICATION: &str = concat!(
    "INSERT INTO notifications (kind, from_user_id, to_user_id, content, is_read, created_at) ",
    "VALUES ($1, $2, $3, $4, FALSE, $5) RETURNING ",
    notification_columns!()
);

pub const NOTIFICATIONS_FOR: &str = concat!(
    "SELECT ",
    notification_columns!(),
    " FROM notifications WHERE to_user_id = $1 ORDER BY id DESC"
);

pub const MARK_NOTIFICATION_READ: &str =
    "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND to_user_id = $2";
