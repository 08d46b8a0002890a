use async_trait::async_trait;

use super::domain::{User, UserId, ValidatedUser};
use crate::errors::ServiceError;

/// Persistence port for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record; the store assigns the id.
    async fn create(&self, user: ValidatedUser) -> Result<User, ServiceError>;
    /// Overwrite every field of the record with `id`.
    async fn update(&self, id: UserId, user: ValidatedUser) -> Result<User, ServiceError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn delete_by_id(&self, id: UserId) -> Result<(), ServiceError>;
    async fn find_all(&self) -> Result<Vec<User>, ServiceError>;
}

/// Simple in-memory repository for tests and local runs.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Store {
        users: BTreeMap<UserId, User>,
        last_id: UserId,
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        store: Mutex<Store>,
        writes: AtomicUsize,
        scans: AtomicUsize,
    }

    impl MockUserRepository {
        /// Pre-populate with stored records, kept in id order.
        /// New ids continue after the largest seeded one.
        pub fn with_users(users: Vec<User>) -> Self {
            let last_id = users.iter().map(|u| u.id).max().unwrap_or(0);
            let users = users.into_iter().map(|u| (u.id, u)).collect();
            Self {
                store: Mutex::new(Store { users, last_id }),
                ..Self::default()
            }
        }

        /// Number of create/update/delete calls that reached the store.
        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Number of `find_all` calls.
        pub fn scans(&self) -> usize {
            self.scans.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.store.lock().map(|s| s.users.len()).unwrap_or_else(|e| e.into_inner().users.len())
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn lock(&self) -> Result<MutexGuard<'_, Store>, ServiceError> {
            self.store.lock().map_err(|e| ServiceError::Db(e.to_string()))
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, user: ValidatedUser) -> Result<User, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut store = self.lock()?;
            store.last_id += 1;
            let stored = user.into_user(store.last_id);
            store.users.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn update(&self, id: UserId, user: ValidatedUser) -> Result<User, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut store = self.lock()?;
            let slot = store.users.get_mut(&id).ok_or(ServiceError::NotFound)?;
            *slot = user.into_user(id);
            Ok(slot.clone())
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ServiceError> {
            Ok(self.lock()?.users.get(&id).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            Ok(self.lock()?.users.values().any(|u| u.email == email))
        }

        async fn delete_by_id(&self, id: UserId) -> Result<(), ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.lock()?.users.remove(&id);
            Ok(())
        }

        async fn find_all(&self) -> Result<Vec<User>, ServiceError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            Ok(self.lock()?.users.values().cloned().collect())
        }
    }
}
