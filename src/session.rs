//! Authentication state shared by every view.
//!
//! The token and the user profile survive reloads in a [`SessionStorage`]
//! backend (`localStorage` in the browser). A [`Session`] handle is cheap to
//! clone and is handed to components through a Yew context; views that
//! render session-dependent output call [`Session::subscribe`] so a logout
//! in one place is reflected everywhere without a reload.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::error::StorageError;
use crate::models::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, looked up on every access.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

type Listener = dyn Fn();

struct Inner {
    storage: Box<dyn SessionStorage>,
    listeners: RefCell<Vec<Weak<Listener>>>,
}

#[derive(Clone)]
pub struct Session {
    inner: Rc<Inner>,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Keeps a change listener registered until dropped.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    _listener: Rc<Listener>,
}

impl Session {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                storage: Box::new(storage),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// `localStorage` when the browser grants it, otherwise an in-memory
    /// store that lasts until the tab closes.
    pub fn browser() -> Self {
        match LocalStorage::storage() {
            Ok(_) => Self::new(LocalStorage),
            Err(e) => {
                log::warn!("session will not persist: {}", e);
                Self::new(MemoryStorage::default())
            }
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.inner
            .storage
            .get(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// The stored profile, provided a token is stored alongside it.
    pub fn get_user(&self) -> Option<User> {
        self.get_token()?;
        let raw = self.inner.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.inner.storage.set(TOKEN_KEY, token)?;
        self.notify();
        Ok(())
    }

    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        self.write_user(user)?;
        self.notify();
        Ok(())
    }

    /// Stores token and profile together and notifies listeners once.
    pub fn login(&self, token: &str, user: &User) -> Result<(), StorageError> {
        self.inner.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.write_user(user) {
            let _ = self.inner.storage.remove(TOKEN_KEY);
            return Err(e);
        }
        log::info!("signed in as {}", user.email);
        self.notify();
        Ok(())
    }

    pub fn logout(&self) {
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(e) = self.inner.storage.remove(key) {
                log::error!("failed to clear {} from storage: {}", key, e);
            }
        }
        log::info!("signed out");
        self.notify();
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn is_privileged(&self) -> bool {
        self.get_user().map(|u| u.is_superuser).unwrap_or(false)
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let listener: Rc<Listener> = Rc::new(listener);
        self.inner
            .listeners
            .borrow_mut()
            .push(Rc::downgrade(&listener));
        Subscription {
            _listener: listener,
        }
    }

    /// Called when another tab wrote the backing storage. Reads always go to
    /// storage, so listeners only need to be told to look again.
    pub fn storage_changed(&self) {
        log::debug!("session storage changed elsewhere");
        self.notify();
    }

    fn write_user(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user).map_err(|e| StorageError::Write(e.to_string()))?;
        self.inner.storage.set(USER_KEY, &raw)
    }

    fn notify(&self) {
        // Listeners may subscribe or drop subscriptions while running, so the
        // list is not borrowed during the calls.
        let live: Vec<Rc<Listener>> = {
            let mut listeners = self.inner.listeners.borrow_mut();
            listeners.retain(|l| l.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn user(superuser: bool) -> User {
        User {
            id: 1,
            email: "anna@example.com".to_string(),
            is_superuser: superuser,
        }
    }

    #[test]
    fn login_then_logout() {
        let session = Session::new(MemoryStorage::default());
        assert!(!session.is_authenticated());

        session.login("jwt-token", &user(false)).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.get_token().as_deref(), Some("jwt-token"));
        assert_eq!(session.get_user(), Some(user(false)));
        assert!(!session.is_privileged());

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(session.get_user(), None);
    }

    #[test]
    fn privileged_flag_comes_from_stored_user() {
        let session = Session::new(MemoryStorage::default());
        session.login("t", &user(true)).unwrap();
        assert!(session.is_privileged());
    }

    #[test]
    fn user_without_token_is_not_reported() {
        let storage = MemoryStorage::default();
        storage
            .set(USER_KEY, &serde_json::to_string(&user(true)).unwrap())
            .unwrap();
        let session = Session::new(storage);
        assert_eq!(session.get_user(), None);
        assert!(!session.is_privileged());
    }

    #[test]
    fn corrupt_user_json_reads_as_absent() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "t").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();
        let session = Session::new(storage);
        assert!(session.is_authenticated());
        assert_eq!(session.get_user(), None);
    }

    #[test]
    fn state_survives_a_new_handle_over_the_same_storage() {
        let storage = MemoryStorage::default();
        Session::new(storage.clone())
            .login("persisted", &user(false))
            .unwrap();
        let reloaded = Session::new(storage);
        assert_eq!(reloaded.get_token().as_deref(), Some("persisted"));
    }

    #[test]
    fn logout_is_observed_by_another_open_view() {
        let session = Session::new(MemoryStorage::default());
        session.login("t", &user(false)).unwrap();

        let other_view = session.clone();
        let seen_authenticated = Rc::new(Cell::new(true));
        let _sub = {
            let seen = seen_authenticated.clone();
            let view = other_view.clone();
            other_view.subscribe(move || seen.set(view.is_authenticated()))
        };

        session.logout();
        assert!(!seen_authenticated.get());
        assert_eq!(other_view.get_user(), None);
    }

    #[test]
    fn logout_in_another_tab_reaches_listeners() {
        let shared = MemoryStorage::default();
        let this_tab = Session::new(shared.clone());
        let other_tab = Session::new(shared);
        this_tab.login("t", &user(false)).unwrap();

        let seen_authenticated = Rc::new(Cell::new(true));
        let _sub = {
            let seen = seen_authenticated.clone();
            let view = this_tab.clone();
            this_tab.subscribe(move || seen.set(view.is_authenticated()))
        };

        other_tab.logout();
        assert!(seen_authenticated.get());
        this_tab.storage_changed();
        assert!(!seen_authenticated.get());
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let session = Session::new(MemoryStorage::default());
        let calls = Rc::new(Cell::new(0));
        let sub = {
            let calls = calls.clone();
            session.subscribe(move || calls.set(calls.get() + 1))
        };
        session.set_token("a").unwrap();
        drop(sub);
        session.set_token("b").unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn login_notifies_once() {
        let session = Session::new(MemoryStorage::default());
        let calls = Rc::new(Cell::new(0));
        let _sub = {
            let calls = calls.clone();
            session.subscribe(move || calls.set(calls.get() + 1))
        };
        session.login("t", &user(false)).unwrap();
        assert_eq!(calls.get(), 1);
    }
}
