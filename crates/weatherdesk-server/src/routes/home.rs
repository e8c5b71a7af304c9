use axum::{response::Html, Extension};

use crate::auth::middleware::SignedIn;
use crate::views;

/// GET /
pub async fn index(signed_in: Option<Extension<SignedIn>>) -> Html<String> {
    let email = signed_in.as_ref().map(|Extension(s)| s.email.as_str());
    views::home(email)
}
