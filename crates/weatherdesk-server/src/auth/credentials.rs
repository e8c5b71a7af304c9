use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::store::CredentialStore;

/// Register a new user. Passwords are kept and compared as given.
pub fn signup(store: &dyn CredentialStore, email: &str, password: &str) -> AppResult<()> {
    store.insert_user(User {
        email: email.to_string(),
        password: password.to_string(),
    })?;
    tracing::info!("Registered user {email}");
    Ok(())
}

/// Check credentials. Unknown email and wrong password are indistinguishable.
pub fn login(store: &dyn CredentialStore, email: &str, password: &str) -> AppResult<User> {
    match store.find_user(email)? {
        Some(user) if user.password == password => Ok(user),
        _ => {
            tracing::debug!("Rejected login for {email}");
            Err(AppError::Unauthorized)
        }
    }
}
