use base64::Engine;
use rand::RngCore;

use crate::error::AppResult;
use crate::models::Session;
use crate::store::SessionStore;

/// Source of opaque session tokens.
pub trait TokenGenerator: Send + Sync {
    fn generate_token(&self) -> String;
}

/// 32 random bytes from the thread RNG, URL-safe base64 without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate_token(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }
}

pub fn create_session(
    store: &dyn SessionStore,
    tokens: &dyn TokenGenerator,
    email: &str,
) -> AppResult<Session> {
    let token = tokens.generate_token();
    store.put_session(&token, email)?;

    Ok(Session {
        token,
        email: email.to_string(),
    })
}

pub fn resolve_session(store: &dyn SessionStore, token: &str) -> AppResult<Option<String>> {
    store.find_session(token)
}

pub fn destroy_session(store: &dyn SessionStore, token: &str) -> AppResult<()> {
    store.delete_session(token)
}
