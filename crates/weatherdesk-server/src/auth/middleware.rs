use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::auth::session;
use crate::error::AppError;
use crate::routes::AppState;

pub const SESSION_COOKIE: &str = "session_id";

/// The browser's resolved session, present as a request extension only
/// when the cookie maps to a live session.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub email: String,
}

/// Resolve the session cookie if there is one. Anonymous requests pass
/// through untouched.
pub async fn attach_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.sessions_enabled {
        return Ok(next.run(request).await);
    }

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(email) = session::resolve_session(state.sessions.as_ref(), cookie.value())? {
            request.extensions_mut().insert(SignedIn { email });
        }
    }

    Ok(next.run(request).await)
}
