use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Identity;
use crate::inbound::http::middleware::SessionIdentity;

pub async fn current(
    Extension(SessionIdentity(identity)): Extension<SessionIdentity>,
) -> Result<ApiSuccess<CurrentResponseData>, ApiError> {
    let user =
        identity.ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentResponseData {
            status: "success".to_string(),
            user,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentResponseData {
    pub status: String,
    pub user: Identity,
}
