//! Account check handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::UserRepository;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::HuddleError;

/// Query carrying a user address.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    /// User address.
    #[serde(default)]
    pub email: String,
}

/// GET /check_email?email= - Check whether an account exists.
pub async fn check_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<&'static str>, ApiError> {
    if UserRepository::new(state.db.pool()).exists(&query.email).await? {
        Ok(Json("ok"))
    } else {
        Err(HuddleError::Validation("no account matches this email".to_string()).into())
    }
}
