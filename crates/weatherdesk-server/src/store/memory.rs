use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::store::{CredentialStore, SessionStore};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, String>,
    sessions: HashMap<String, String>,
}

/// Process-local store. One lock covers both tables, so every operation is
/// serialized against every other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn insert_user(&self, user: User) -> AppResult<()> {
        let mut tables = self.tables.lock();
        match tables.users.entry(user.email) {
            Entry::Occupied(_) => Err(AppError::Conflict("User already exists".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.password);
                Ok(())
            }
        }
    }

    fn find_user(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock();
        Ok(tables.users.get(email).map(|password| User {
            email: email.to_string(),
            password: password.clone(),
        }))
    }
}

impl SessionStore for MemoryStore {
    fn put_session(&self, token: &str, email: &str) -> AppResult<()> {
        self.tables
            .lock()
            .sessions
            .insert(token.to_string(), email.to_string());
        Ok(())
    }

    fn find_session(&self, token: &str) -> AppResult<Option<String>> {
        Ok(self.tables.lock().sessions.get(token).cloned())
    }

    fn delete_session(&self, token: &str) -> AppResult<()> {
        self.tables.lock().sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, password: &str) -> User {
        User {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn duplicate_email_is_rejected_and_original_kept() {
        let store = MemoryStore::new();
        store.insert_user(user("a@example.com", "first")).unwrap();

        let err = store.insert_user(user("a@example.com", "second")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = store.find_user("a@example.com").unwrap().unwrap();
        assert_eq!(stored.password, "first");
    }

    #[test]
    fn unknown_user_is_absent() {
        let store = MemoryStore::new();
        assert!(store.find_user("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn session_lifecycle() {
        let store = MemoryStore::new();
        store.put_session("tok", "a@example.com").unwrap();
        assert_eq!(
            store.find_session("tok").unwrap().as_deref(),
            Some("a@example.com")
        );

        store.delete_session("tok").unwrap();
        assert!(store.find_session("tok").unwrap().is_none());

        // Second delete is a no-op.
        store.delete_session("tok").unwrap();
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.insert_user(user("a@example.com", "pw")).unwrap();
        assert!(other.find_user("a@example.com").unwrap().is_some());
    }

    #[test]
    fn concurrent_signups_with_distinct_emails_all_land() {
        let store = MemoryStore::new();

        std::thread::scope(|scope| {
            for i in 0..64 {
                let store = &store;
                scope.spawn(move || {
                    store
                        .insert_user(user(&format!("user{i}@example.com"), "pw"))
                        .unwrap();
                });
            }
        });

        for i in 0..64 {
            assert!(store
                .find_user(&format!("user{i}@example.com"))
                .unwrap()
                .is_some());
        }
        assert_eq!(store.tables.lock().users.len(), 64);
    }
}
