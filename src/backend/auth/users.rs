/**
 * User Accounts
 *
 * Account operations behind the auth handlers: registration, credential
 * checks and presence status. Each call runs in its own gateway
 * transaction.
 */

use crate::backend::auth::handlers::types::SignupRequest;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::gateway::{Gateway, NewUser, User, UserUpdate};
use crate::shared::{SharedError, UserProfile, UserStatus};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 50;

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            status: user.status(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            profile_image: user.profile_image,
            cover_image: user.cover_image,
            created_at: user.created_at,
        }
    }
}

/// Check signup fields before touching the database
pub fn validate_signup(request: &SignupRequest) -> Result<(), SharedError> {
    for (field, value) in [
        ("first_name", &request.first_name),
        ("last_name", &request.last_name),
    ] {
        let len = value.trim().chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(SharedError::validation(
                field,
                format!("{} must be 1-{} characters", field, MAX_NAME_LEN),
            ));
        }
    }

    if !request.email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email format"));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    Ok(())
}

/// Create an account; the email must not be registered yet
pub async fn register(
    gateway: &dyn Gateway,
    request: SignupRequest,
    bcrypt_cost: u32,
) -> BackendResult<User> {
    validate_signup(&request)?;
    // Hash before the transaction opens
    let password_hash = bcrypt::hash(&request.password, bcrypt_cost)?;

    let mut tx = gateway.begin().await?;
    if tx.find_user_by_email(&request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(BackendError::Conflict("Email already registered".to_string()));
    }

    let user = tx
        .create_user(NewUser {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email,
            password_hash,
        })
        .await
        .map_err(|err| {
            if err.is_storage_conflict() {
                BackendError::Conflict("Email already registered".to_string())
            } else {
                err
            }
        })?;
    tx.commit().await?;

    tracing::info!("User created: {} ({})", user.id, user.email);
    Ok(user)
}

/// Look up an account by email and check its password
pub async fn authenticate(gateway: &dyn Gateway, email: &str, password: &str) -> BackendResult<User> {
    let mut tx = gateway.begin().await?;
    let user = tx.find_user_by_email(email).await?.ok_or_else(|| {
        tracing::warn!("Login with unknown email: {}", email);
        BackendError::InvalidCredentials("Incorrect email address".to_string())
    })?;
    tx.commit().await?;

    if !bcrypt::verify(password, &user.password_hash)? {
        tracing::warn!("Login with wrong password for: {}", email);
        return Err(BackendError::InvalidCredentials("Incorrect password".to_string()));
    }

    Ok(user)
}

/// Flip a user's presence status
pub async fn set_status(gateway: &dyn Gateway, user_id: uuid::Uuid, status: UserStatus) -> BackendResult<User> {
    let mut tx = gateway.begin().await?;
    let user = tx
        .update_user(
            user_id,
            UserUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
        .await?
        .ok_or(BackendError::UserNotFound)?;
    tx.commit().await?;
    Ok(user)
}

pub async fn get_user(gateway: &dyn Gateway, user_id: uuid::Uuid) -> BackendResult<User> {
    let mut tx = gateway.begin().await?;
    let user = tx.find_user(user_id).await?.ok_or(BackendError::UserNotFound)?;
    tx.commit().await?;
    Ok(user)
}
