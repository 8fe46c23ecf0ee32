//! Accounts, sessions and auth state listeners
//!
//! Account passwords are never stored. Each account keeps a random salt, its
//! key derivation round count and a random token sealed with the derived key;
//! a sign-in is accepted when that token opens.

use chrono::Utc;
use log::{info, warn};
use crate::error::{VaultError, Result};
use crate::crypto::{self, derive_key, KEY_LENGTH};
use crate::database::User;
use crate::database::queries::{self, RawUser};
use crate::utils::{
    format_timestamp, generate_id, generate_salt, generate_uuid, is_valid_email,
    normalize_email, parse_timestamp,
};
use super::vault::Vault;

/// Length of the random token sealed as the sign-in verifier
const VERIFIER_TOKEN_LENGTH: usize = 32;

/// Callback invoked with the signed-in user, or `None` after sign-out
pub type AuthListener = Box<dyn FnMut(Option<&User>) + Send>;

/// Handle returned by [`Vault::on_auth_state_changed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Signed-in user with the key sealing their secrets
pub(crate) struct Session {
    pub(crate) user: User,
    pub(crate) key: [u8; KEY_LENGTH],
}

fn user_from_raw(raw: &RawUser) -> User {
    User {
        user_id: raw.user_id.clone(),
        email: raw.email.clone(),
        created_at: raw.create_timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
        last_sign_in: raw.last_sign_in.as_deref().and_then(parse_timestamp),
    }
}

impl Vault {
    /// Create an account and sign it in
    pub fn sign_up(&mut self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(VaultError::InvalidEmail(email));
        }

        let min_length = self.config.min_account_password_length;
        if password.chars().count() < min_length {
            return Err(VaultError::WeakPassword(min_length));
        }

        let conn = self.connection()?;
        if queries::email_exists(conn, &email)? {
            return Err(VaultError::EmailAlreadyInUse(email));
        }

        let salt = generate_salt();
        let key_rounds = self.config.key_derivation_rounds;
        let key = derive_key(password, &salt, key_rounds);
        let verifier = crypto::seal(&generate_id(VERIFIER_TOKEN_LENGTH), &key)
            .map_err(VaultError::EncryptionError)?;

        let now = format_timestamp(&Utc::now());
        let raw = RawUser {
            user_id: generate_uuid(),
            email,
            salt,
            key_rounds,
            verifier,
            create_timestamp: Some(now.clone()),
            last_sign_in: Some(now),
        };
        queries::create_user(conn, &raw)?;

        let user = user_from_raw(&raw);
        info!("Signed up {} ({})", user.email, user.user_id);
        self.start_session(Session { user: user.clone(), key });
        Ok(user)
    }

    /// Sign in with email and password
    ///
    /// An unknown email and a wrong password are reported the same way.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        let conn = self.connection()?;

        let Some(raw) = queries::get_user_by_email(conn, &email)? else {
            warn!("Rejected sign-in for unknown account {}", email);
            return Err(VaultError::InvalidCredentials);
        };

        let key = derive_key(password, &raw.salt, raw.key_rounds);
        if crypto::open(&raw.verifier, &key).is_err() {
            warn!("Rejected sign-in for {}", email);
            return Err(VaultError::InvalidCredentials);
        }

        let now = format_timestamp(&Utc::now());
        queries::update_last_sign_in(conn, &raw.user_id, &now)?;

        let mut user = user_from_raw(&raw);
        user.last_sign_in = parse_timestamp(&now);
        info!("Signed in {} ({})", user.email, user.user_id);
        self.start_session(Session { user: user.clone(), key });
        Ok(user)
    }

    /// Sign out; a no-op when nobody is signed in
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Signed out {}", session.user.email);
            self.clear_caches();
            self.notify_auth_listeners();
        }
    }

    /// Currently signed-in user
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Check if a user is signed in
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Subscribe to auth state changes.
    ///
    /// The listener is called right away with the current state, then after
    /// every sign-up, sign-in and sign-out.
    pub fn on_auth_state_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Option<&User>) + Send + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;

        let mut listener: AuthListener = Box::new(listener);
        listener(self.session.as_ref().map(|s| &s.user));
        self.listeners.push((id, listener));
        id
    }

    /// Unsubscribe a listener; returns false if it was not registered
    pub fn remove_auth_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Ensure a user is signed in
    pub(crate) fn ensure_signed_in(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(VaultError::NotSignedIn)
    }

    fn start_session(&mut self, session: Session) {
        self.session = Some(session);
        self.clear_caches();
        self.notify_auth_listeners();
    }

    fn notify_auth_listeners(&mut self) {
        let user = self.session.as_ref().map(|s| &s.user);
        for (_, listener) in self.listeners.iter_mut() {
            listener(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use super::*;
    use crate::business::vault::tests::{create_test_vault, TEST_EMAIL, TEST_PASSWORD};

    #[test]
    fn test_sign_up_signs_in() {
        let (mut vault, _temp) = create_test_vault();
        assert!(!vault.is_signed_in());

        let user = vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        assert!(vault.is_signed_in());
        assert_eq!(user.email, TEST_EMAIL);
        assert_eq!(user.user_id.len(), 32);
        assert!(user.last_sign_in.is_some());
        assert_eq!(vault.current_user(), Some(&user));
    }

    #[test]
    fn test_sign_in_after_sign_out() {
        let (mut vault, _temp) = create_test_vault();
        let created = vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        vault.sign_out();
        assert!(!vault.is_signed_in());
        assert!(vault.current_user().is_none());

        let user = vault.sign_in(TEST_EMAIL, TEST_PASSWORD).unwrap();
        assert_eq!(user.user_id, created.user_id);
        assert!(vault.is_signed_in());
    }

    #[test]
    fn test_email_normalized() {
        let (mut vault, _temp) = create_test_vault();
        vault.sign_up("  Jane@Example.COM ", TEST_PASSWORD).unwrap();
        vault.sign_out();
        assert!(vault.sign_in("jane@example.com", TEST_PASSWORD).is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let (mut vault, _temp) = create_test_vault();
        vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        vault.sign_out();

        let result = vault.sign_in(TEST_EMAIL, "WrongPassword");
        assert!(matches!(result, Err(VaultError::InvalidCredentials)));
        assert!(!vault.is_signed_in());
    }

    #[test]
    fn test_unknown_email() {
        let (mut vault, _temp) = create_test_vault();
        let result = vault.sign_in("nobody@example.com", TEST_PASSWORD);
        assert!(matches!(result, Err(VaultError::InvalidCredentials)));
    }

    #[test]
    fn test_duplicate_sign_up() {
        let (mut vault, _temp) = create_test_vault();
        vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        let result = vault.sign_up("JANE@example.com", "OtherPassword1");
        assert!(matches!(result, Err(VaultError::EmailAlreadyInUse(_))));
    }

    #[test]
    fn test_invalid_email() {
        let (mut vault, _temp) = create_test_vault();
        assert!(matches!(
            vault.sign_up("not-an-email", TEST_PASSWORD),
            Err(VaultError::InvalidEmail(_))
        ));
        assert!(!vault.is_signed_in());
    }

    #[test]
    fn test_weak_account_password() {
        let (mut vault, _temp) = create_test_vault();
        assert!(matches!(
            vault.sign_up(TEST_EMAIL, "12345"),
            Err(VaultError::WeakPassword(6))
        ));
        assert!(vault.sign_up(TEST_EMAIL, "123456").is_ok());
    }

    #[test]
    fn test_sign_in_uses_stored_rounds() {
        let (mut vault, _temp) = create_test_vault();
        vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        vault.sign_out();

        // Changing the configured rounds must not lock out existing accounts
        vault.config.key_derivation_rounds = 25;
        assert!(vault.sign_in(TEST_EMAIL, TEST_PASSWORD).is_ok());
    }

    #[test]
    fn test_auth_listener_lifecycle() {
        let (mut vault, _temp) = create_test_vault();
        let events: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&events);
        let id = vault.on_auth_state_changed(move |user| {
            sink.lock().unwrap().push(user.map(|u| u.email.clone()));
        });

        vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        vault.sign_out();
        // Signing out twice only reports once
        vault.sign_out();
        vault.sign_in(TEST_EMAIL, TEST_PASSWORD).unwrap();

        assert!(vault.remove_auth_listener(id));
        assert!(!vault.remove_auth_listener(id));
        vault.sign_out();

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                None,
                Some(TEST_EMAIL.to_string()),
                None,
                Some(TEST_EMAIL.to_string()),
            ]
        );
    }

    #[test]
    fn test_listener_sees_current_user_on_subscribe() {
        let (mut vault, _temp) = create_test_vault();
        vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();

        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        vault.on_auth_state_changed(move |user| {
            *sink.lock().unwrap() = user.map(|u| u.email.clone());
        });

        assert_eq!(seen.lock().unwrap().as_deref(), Some(TEST_EMAIL));
    }

    #[test]
    fn test_ensure_signed_in() {
        let (mut vault, _temp) = create_test_vault();
        assert!(matches!(vault.ensure_signed_in(), Err(VaultError::NotSignedIn)));
        vault.sign_up(TEST_EMAIL, TEST_PASSWORD).unwrap();
        assert!(vault.ensure_signed_in().is_ok());
    }
}
