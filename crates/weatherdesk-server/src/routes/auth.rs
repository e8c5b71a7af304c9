use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::{credentials, middleware::SESSION_COOKIE, session};
use crate::error::AppResult;
use crate::routes::AppState;
use crate::views;

/// Signup and login form body. Absent fields read as empty.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn signup_form() -> Html<String> {
    views::signup()
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Form(body): Form<CredentialsForm>,
) -> AppResult<Redirect> {
    credentials::signup(state.credentials.as_ref(), &body.email, &body.password)?;
    Ok(Redirect::to("/login"))
}

pub async fn login_form() -> Html<String> {
    views::login(None)
}

/// POST /login
///
/// With sessions enabled this issues the session cookie and sends the browser
/// home. Otherwise the login page is rendered again with a success notice.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<CredentialsForm>,
) -> AppResult<Response> {
    let user = credentials::login(state.credentials.as_ref(), &body.email, &body.password)?;

    if !state.config.sessions_enabled {
        let notice = format!("Login successful. Welcome, {}!", user.email);
        return Ok(views::login(Some(&notice)).into_response());
    }

    let sess = session::create_session(
        state.sessions.as_ref(),
        state.tokens.as_ref(),
        &user.email,
    )?;
    tracing::info!("Started session for {}", sess.email);

    let cookie = build_session_cookie(sess.token, state.config.secure_cookies);
    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        session::destroy_session(state.sessions.as_ref(), cookie.value())?;
    }

    let removal = Cookie::build(SESSION_COOKIE)
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    Ok((jar.add(removal), Redirect::to("/")))
}

fn build_session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .build()
}
