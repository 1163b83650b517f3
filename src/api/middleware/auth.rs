//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// The authenticated caller, attached to request extensions by
/// [`layer`]. Handlers read it with `Extension<CurrentUser>`.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Authenticates requests using Bearer access tokens.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access JWT>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract the token from the `Authorization` header
/// 2. Verify the JWT signature, expiry, and token kind
/// 3. Load the token's user from the database
/// 4. Attach [`CurrentUser`] to request extensions
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer` per
/// RFC 6750) if the header is missing, the token is invalid or expired,
/// or the user no longer exists.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Access denied: No token provided",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
