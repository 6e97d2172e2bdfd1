//! Shared wiring for handler tests.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::auth::Argon2PasswordHasher;
use crate::adapters::memory::InMemoryPortalStore;
use crate::adapters::sessions::InMemorySessionStore;
use crate::ports::{PasswordHasher, SessionStore, StudentProfileRepository, UserRepository};

pub(crate) struct Fixture {
    pub store: InMemoryPortalStore,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn StudentProfileRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryPortalStore::new();
        Self {
            users: Arc::new(store.users()),
            profiles: Arc::new(store.profiles()),
            sessions: Arc::new(InMemorySessionStore::new(Duration::from_secs(3600))),
            hasher: Arc::new(Argon2PasswordHasher::with_cost(1024, 1).unwrap()),
            store,
        }
    }
}
