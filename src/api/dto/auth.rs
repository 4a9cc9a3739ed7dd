//! DTOs for registration and login.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/register` and `POST /api/auth/login`.
///
/// Missing fields deserialize as empty strings so they surface as field-level
/// validation errors rather than body rejections.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
}
