use serde::{Deserialize, Serialize};

/// Request body for user registration.
///
/// Fields default to empty strings so an absent key reaches the presence
/// check (400 "Please enter all fields") instead of failing JSON
/// extraction.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub ration_card_id: String,
    #[serde(default)]
    pub role: String,
}

/// Request body for login. `identifier` may be a username, email or phone.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub msg: String,
    pub token: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
