//! Signed-in context and per-screen access checks.
//!
//! Authentication itself is handled by an external identity provider. The
//! dashboard only needs to know whether somebody is signed in, so the answer
//! is captured once at startup in a [`Session`] and handed to whatever needs it.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming the signed-in user.
pub const USER_ENV_VAR: &str = "BIDBOARD_USER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn signed_in(name: impl Into<String>) -> Self {
        Session {
            user: Some(User { name: name.into() }),
        }
    }

    pub fn anonymous() -> Self {
        Session::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

/// Source of the current session.
pub trait SessionProvider {
    fn current_session(&self) -> Session;
}

/// Reads the signed-in user from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvSession {
    var: String,
}

impl EnvSession {
    pub fn new(var: impl Into<String>) -> Self {
        EnvSession { var: var.into() }
    }
}

impl Default for EnvSession {
    fn default() -> Self {
        EnvSession::new(USER_ENV_VAR)
    }
}

impl SessionProvider for EnvSession {
    fn current_session(&self) -> Session {
        match std::env::var(&self.var) {
            Ok(name) if !name.trim().is_empty() => Session::signed_in(name.trim()),
            _ => Session::anonymous(),
        }
    }
}

/// Dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Home,
    Projects,
    Calendar,
    Bids,
    Messages,
}

impl Screen {
    /// Every screen shows the contractor's own data, so none is public.
    pub fn requires_sign_in(self) -> bool {
        match self {
            Screen::Home | Screen::Projects | Screen::Calendar | Screen::Bids | Screen::Messages => {
                true
            }
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Projects => "projects",
            Screen::Calendar => "calendar",
            Screen::Bids => "bids",
            Screen::Messages => "messages",
        };
        f.write_str(name)
    }
}

/// Refuse protected screens when nobody is signed in.
pub fn guard(screen: Screen, session: &Session) -> Result<()> {
    if screen.requires_sign_in() && !session.is_signed_in() {
        debug!("denied {} to anonymous session", screen);
        return Err(Error::SignInRequired(screen));
    }
    debug!("granted {} (signed in: {})", screen, session.is_signed_in());
    Ok(())
}
