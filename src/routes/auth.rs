use crate::{
    auth::{AuthResponse, LoginRequest},
    error::AppError,
    state::AppState,
    usecases::authenticate_user::{AuthenticateUser, AuthenticateUserRequest},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Login user
///
/// Authenticates a user by username and password and returns a bearer token
/// with its expiry timestamp.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;
    let login_data = login_data.into_inner();

    let use_case = AuthenticateUser::new(
        state.user_repository.clone(),
        state.token_codec.clone(),
        state.password_hasher.clone(),
        state.token_exp_minutes,
    );

    let response = use_case
        .execute(AuthenticateUserRequest {
            username: login_data.username,
            password: login_data.password,
        })
        .await
        .map_err(|err| match err {
            // Credential failures surface as 401 at this boundary.
            AppError::InvalidUser(msg) => AppError::Unauthorized(msg),
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token: response.token,
        expires_at: response.expires_at,
    }))
}
