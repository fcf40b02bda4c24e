//! Explicit list cache: per-resource slots with a fixed TTL, invalidated on
//! successful mutation of the same resource. There is no hidden background
//! refetch, a stale slot simply misses and the next read goes to the backend.

use std::{collections::HashMap, sync::Mutex};

use bi_shared::{
    branch::Branch,
    department::Department,
    report::AccountBaseRecord,
    time::{Seconds, Timestamp},
    uac::{AppPermission, Principal, Role},
};

#[derive(Debug)]
pub(crate) struct Cached<T> {
    ttl: Seconds,
    slot: Mutex<Option<(Timestamp, T)>>,
}

impl<T: Clone> Cached<T> {
    fn new(ttl: Seconds) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the stored value only while it is within the TTL
    pub fn fresh(&self) -> Option<T> {
        let slot = self.slot.lock().expect("cache mutex poisoned");
        let (stored_at, value) = slot.as_ref()?;
        match stored_at.elapsed() {
            Some(age) if age <= self.ttl => Some(value.clone()),
            // Expired, or the clock moved backwards, either way refetch
            _ => None,
        }
    }

    pub fn store(&self, value: T) {
        *self.slot.lock().expect("cache mutex poisoned") = Some((Timestamp::now(), value));
    }

    pub fn invalidate(&self) {
        *self.slot.lock().expect("cache mutex poisoned") = None;
    }

    #[cfg(test)]
    fn store_at(&self, stored_at: Timestamp, value: T) {
        *self.slot.lock().expect("cache mutex poisoned") = Some((stored_at, value));
    }
}

/// Same policy as [`Cached`] but keyed, for lists whose contents depend on
/// query parameters (the account-base report filters)
#[derive(Debug)]
pub(crate) struct CachedByKey<T> {
    ttl: Seconds,
    slots: Mutex<HashMap<String, (Timestamp, T)>>,
}

impl<T: Clone> CachedByKey<T> {
    fn new(ttl: Seconds) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn fresh(&self, key: &str) -> Option<T> {
        let slots = self.slots.lock().expect("cache mutex poisoned");
        let (stored_at, value) = slots.get(key)?;
        match stored_at.elapsed() {
            Some(age) if age <= self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn store(&self, key: String, value: T) {
        self.slots
            .lock()
            .expect("cache mutex poisoned")
            .insert(key, (Timestamp::now(), value));
    }

    pub fn invalidate_all(&self) {
        self.slots.lock().expect("cache mutex poisoned").clear();
    }
}

/// One slot per backend resource collection
#[derive(Debug)]
pub(crate) struct ListCaches {
    pub users: Cached<Vec<Principal>>,
    pub roles: Cached<Vec<Role>>,
    pub permissions: Cached<Vec<AppPermission>>,
    pub branches: Cached<Vec<Branch>>,
    pub departments: Cached<Vec<Department>>,
    pub account_base: CachedByKey<Vec<AccountBaseRecord>>,
}

impl ListCaches {
    pub fn new(ttl: Seconds) -> Self {
        Self {
            users: Cached::new(ttl),
            roles: Cached::new(ttl),
            permissions: Cached::new(ttl),
            branches: Cached::new(ttl),
            departments: Cached::new(ttl),
            account_base: CachedByKey::new(ttl),
        }
    }

    /// Used when the principal changes, what the previous one was allowed to
    /// see is no longer trustworthy
    pub fn clear_all(&self) {
        self.users.invalidate();
        self.roles.invalidate();
        self.permissions.invalidate();
        self.branches.invalidate();
        self.departments.invalidate();
        self.account_base.invalidate_all();
    }
}
