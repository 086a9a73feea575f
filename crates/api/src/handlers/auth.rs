//! Authentication handlers: registration, login, email verification, and
//! password reset.
//!
//! There is no mail transport wired up; issued verification codes are
//! written to the structured log, where a delivery worker (or a developer)
//! picks them up.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use learnhub_core::error::CoreError;
use learnhub_core::roles::ROLE_USER;
use learnhub_db::models::otp::{PURPOSE_REGISTRATION, PURPOSE_RESET};
use learnhub_db::models::user::{CreateUser, User, UserResponse};
use learnhub_db::repositories::{OtpRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::otp::{generate_code, OTP_TTL_MINUTES};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, Message};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an unverified account and issue a registration code. Registering
/// an existing unverified email re-issues the code instead of failing.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    if let Some(existing) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        if existing.is_verified {
            return Err(AppError::Core(CoreError::Conflict(
                "User already exists".into(),
            )));
        }

        issue_code(&state, &input.email, PURPOSE_REGISTRATION).await?;
        return Ok(Json(DataResponse {
            data: Message::new(
                "User already registered. Please verify your email with the code sent to you.",
            ),
        }));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.clone(),
            name: input.name.clone(),
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    issue_code(&state, &user.email, PURPOSE_REGISTRATION).await?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    Ok(Json(DataResponse {
        data: Message::new("Registration successful. Please verify your email with the code sent to you."),
    }))
}

/// POST /api/v1/auth/login
///
/// Exchange credentials for a bearer token. Unverified and blocked accounts
/// cannot log in.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if input.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".into()));
    }

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is not verified".into(),
        )));
    }
    if user.blocked {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is blocked".into(),
        )));
    }

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            token,
            user: user.into(),
        },
    }))
}

/// POST /api/v1/auth/otp/verify
///
/// Confirm a registration code and mark the account verified.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<impl IntoResponse> {
    let otp = OtpRepo::find_latest_valid(&state.pool, &input.email, PURPOSE_REGISTRATION)
        .await?
        .filter(|otp| otp.code == input.code)
        .ok_or_else(|| AppError::BadRequest("Invalid or expired verification code".into()))?;

    OtpRepo::mark_used(&state.pool, otp.id).await?;

    if !UserRepo::mark_verified(&state.pool, &input.email).await? {
        return Err(AppError::BadRequest(
            "No account registered for this email".into(),
        ));
    }

    tracing::info!(email = %input.email, "Email verified");

    Ok(Json(DataResponse {
        data: Message::new("Email verified. You can now log in."),
    }))
}

/// POST /api/v1/auth/password-reset/request
///
/// Issue a reset code when the email is registered. Always responds with the
/// same message to prevent email enumeration.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        issue_code(&state, &input.email, PURPOSE_RESET).await?;
    }

    Ok(Json(DataResponse {
        data: Message::new("If your email is registered, you will receive a password reset code"),
    }))
}

/// POST /api/v1/auth/password-reset/confirm
///
/// Consume a reset code and replace the account password.
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetConfirm>,
) -> AppResult<impl IntoResponse> {
    validate_password_strength(&input.new_password).map_err(AppError::BadRequest)?;

    let otp = OtpRepo::find_latest_valid(&state.pool, &input.email, PURPOSE_RESET)
        .await?
        .ok_or_else(|| AppError::BadRequest("No valid reset code found".into()))?;
    if otp.code != input.code {
        return Err(AppError::BadRequest("Invalid reset code".into()));
    }
    OtpRepo::mark_used(&state.pool, otp.id).await?;

    let user: User = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("No account registered for this email".into()))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password reset");

    Ok(Json(DataResponse {
        data: Message::new("Password has been reset successfully"),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn issue_code(state: &AppState, email: &str, purpose: &str) -> Result<(), AppError> {
    let code = generate_code();
    let otp = OtpRepo::create(&state.pool, email, &code, purpose, OTP_TTL_MINUTES).await?;

    // Stand-in for mail delivery.
    tracing::info!(email, purpose, code = %otp.code, "Verification code issued");
    Ok(())
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}
