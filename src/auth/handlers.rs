use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::auth::auth::AuthUser;
use crate::auth::jwt::{generate_session_token, verify_token};
use crate::config::Config;
use crate::model::role::Role;
use crate::models::{LoginReqDto, SessionUser};
use crate::store::user::UserStore;
use crate::utils::token_cache;

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
    #[schema(example = "/dashboard")]
    pub redirect: String,
}

fn redirect_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Finance => "/finance",
        Role::Employee => "/dashboard",
    }
}

/// Sign in against the seeded credential list.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(users, config, payload), fields(email = %payload.email))]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    users: web::Data<UserStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        info!("Validation failed: empty email or password");
        return Err(ApiError::BadRequest("Email and password required".into()));
    }

    debug!("Matching credentials");

    // Same response for unknown email and wrong password.
    let user = users
        .verify_credentials(payload.email.trim(), &payload.password)
        .ok_or(ApiError::InvalidCredentials)?;

    let session_user = SessionUser {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
        name: user.name.clone(),
    };
    let token = generate_session_token(&session_user, &config.jwt_secret, config.session_ttl);

    info!(user_id = user.id, role = %user.role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        redirect: redirect_for(session_user.role).to_owned(),
        user: session_user,
    }))
}

/// Discard the presented session. Always succeeds, even for tokens that
/// are absent, malformed, or already revoked.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Session discarded")),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    if let Ok(claims) = verify_token(token, &config.jwt_secret) {
        token_cache::revoke(&claims.jti).await;
        info!(user_id = claims.user_id, "Logout");
    }

    HttpResponse::NoContent().finish()
}

/// The identity behind the presented token; protected views read this on
/// mount to gate access.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current identity", body = SessionUser),
        (status = 401, description = "No live session")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
#[get("/session")]
pub async fn session(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(auth.user)
}
