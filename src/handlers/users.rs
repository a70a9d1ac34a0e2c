use std::collections::HashMap;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::users::UserRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

impl RegisterUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if !(3..=120).contains(&self.first_name.chars().count()) {
            field_errors.insert(
                "firstName".to_string(),
                "First name must be between 3 and 120 characters.".to_string(),
            );
        }

        if !(3..=120).contains(&self.last_name.chars().count()) {
            field_errors.insert(
                "lastName".to_string(),
                "Last name must be between 3 and 120 characters.".to_string(),
            );
        }

        if !(3..=50).contains(&self.username.chars().count()) {
            field_errors.insert(
                "username".to_string(),
                "Username must be between 3 and 50 characters.".to_string(),
            );
        }

        if !(8..=100).contains(&self.password.chars().count()) {
            field_errors.insert(
                "password".to_string(),
                "Password must be at least 8 characters long.".to_string(),
            );
        } else if !self.password.chars().any(|c| c.is_ascii_uppercase())
            || !self.password.chars().any(|c| c.is_ascii_digit())
        {
            field_errors.insert(
                "password".to_string(),
                "Password must contain at least one uppercase letter and one digit.".to_string(),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "Invalid registration data.",
                Some(field_errors),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub token: String,
}

/// POST /api/users/log-in - authenticate and receive a session token
pub async fn log_in(
    State(state): State<AppState>,
    Json(request): Json<LogInRequest>,
) -> Result<Json<LogInResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone());

    let user = users
        .verify_login(&request.username, &request.password)
        .await?
        .ok_or_else(|| {
            ApiError::unauthorized("The username or password provided is incorrect.")
        })?;

    let roles = users.roles_of(user.id).await?;
    let token = state.tokens.issue(user.id, &roles)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LogInResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        token,
    }))
}

/// POST /api/users/register-user - open registration, grants the User role
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    UserRepository::new(state.pool.clone())
        .register(
            &request.username,
            &request.first_name,
            &request.last_name,
            &request.password,
            Role::User,
        )
        .await?;

    Ok(Json(json!({ "message": "User created successfully." })))
}

/// POST /api/users/register-moderator - admin only, grants the Moderator role
pub async fn register_moderator(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_any(&[Role::Admin])?;
    request.validate()?;

    UserRepository::new(state.pool.clone())
        .register(
            &request.username,
            &request.first_name,
            &request.last_name,
            &request.password,
            Role::Moderator,
        )
        .await?;

    Ok(Json(json!({ "message": "Moderator created successfully." })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            username: "ada".to_string(),
            password: "Analytical1".to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_registration() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_short_names_and_usernames() {
        let mut request = valid_request();
        request.first_name = "Al".to_string();
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.username = "ab".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_a_short_password() {
        let mut request = valid_request();
        request.password = "Abc1".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_a_password_without_uppercase_or_digit() {
        let mut request = valid_request();
        request.password = "alllowercase1".to_string();
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.password = "NoDigitsHere".to_string();
        assert!(request.validate().is_err());
    }
}
