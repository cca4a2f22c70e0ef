//! In-process per-member locks.
//!
//! One tokio mutex per member, created on first use. Suitable for a
//! single-process deployment; a multi-node deployment would swap this
//! adapter for database advisory locks behind the same port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::ports::{MemberLock, MemberLockGuard};

#[derive(Default)]
pub struct InMemoryMemberLock {
    locks: Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<()>>>>,
}

impl InMemoryMemberLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberLock for InMemoryMemberLock {
    async fn acquire(&self, user_id: &UserId) -> MemberLockGuard {
        // The map lock is released before awaiting the member mutex.
        let member_mutex = {
            let mut locks = self.locks.lock().expect("InMemoryMemberLock lock poisoned");
            locks
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        MemberLockGuard::new(member_mutex.lock_owned().await)
    }
}
