use chrono::{DateTime, Duration, Utc};
use log::info;

use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// The admin gate: one shared password, one in-memory flag. Explicitly NOT a
/// security boundary — the password ships with the client and the flag is
/// trivially forgeable. Views that need gated access take this object
/// instead of reaching into ambient state.
pub struct AdminSession {
    password: String,
    ttl: Option<Duration>,
    authenticated_at: Option<DateTime<Utc>>,
}

impl AdminSession {
    pub fn new(password: impl Into<String>, ttl_minutes: Option<i64>) -> Self {
        Self {
            password: password.into(),
            ttl: ttl_minutes.map(Duration::minutes),
            authenticated_at: None,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.admin_password.clone(), config.session_ttl_minutes)
    }

    /// Exact match activates the session; anything else reports the same
    /// generic failure.
    pub fn login(&mut self, input: &str, now: DateTime<Utc>) -> Result<()> {
        if input == self.password {
            self.authenticated_at = Some(now);
            info!("Admin session started");
            Ok(())
        } else {
            Err(Error::Auth)
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match (self.authenticated_at, self.ttl) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(ttl)) => now - at < ttl,
        }
    }

    pub fn logout(&mut self) {
        if self.authenticated_at.take().is_some() {
            info!("Admin session ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-05T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn exact_password_activates_the_session() {
        let mut session = AdminSession::new("1990-2026", None);
        assert!(!session.is_active(now()));

        session.login("1990-2026", now()).unwrap();
        assert!(session.is_active(now()));
    }

    #[test]
    fn any_other_input_is_rejected_and_leaves_the_flag_unset() {
        let mut session = AdminSession::new("1990-2026", None);
        assert!(matches!(session.login("1990-2027", now()), Err(Error::Auth)));
        assert!(matches!(session.login("", now()), Err(Error::Auth)));
        assert!(!session.is_active(now()));
    }

    #[test]
    fn logout_clears_the_session() {
        let mut session = AdminSession::new("pw", None);
        session.login("pw", now()).unwrap();
        session.logout();
        assert!(!session.is_active(now()));
    }

    #[test]
    fn sessions_with_a_ttl_expire() {
        let mut session = AdminSession::new("pw", Some(30));
        session.login("pw", now()).unwrap();

        assert!(session.is_active(now() + Duration::minutes(29)));
        assert!(!session.is_active(now() + Duration::minutes(30)));
    }
}
