use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Identity;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const REGISTER_FAILED_MESSAGE: &str = "Error registering user";

pub async fn register<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .user_service
        .register_user(command)
        .await
        .map_err(|e| match e {
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::internal(REGISTER_FAILED_MESSAGE, e)
            }
            other => ApiError::from(other),
        })
        .map(|user| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    message: "User created".to_string(),
                    user: user.into(),
                },
            )
        })
}

/// HTTP request body for registration (raw JSON). Presence is checked in the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    age: Option<i32>,
    password: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        RegisterUserCommand::new(
            self.first_name,
            self.last_name,
            self.email,
            self.age,
            self.password,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub user: Identity,
}
