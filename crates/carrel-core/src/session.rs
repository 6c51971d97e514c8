//! Login session.
//!
//! Authentication is a name match: `"Admin"` logs in the administrator, a
//! single ASCII letter logs in that user. The session lives in memory only.

use std::fmt;

use crate::{error::LibraryError, seat::UserLetter};

/// Logged-in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Administrator with unlimited authority.
    Admin,
    /// Normal user identified by a letter.
    User(UserLetter),
}

impl Identity {
    /// Name the administrator logs in with.
    pub const ADMIN_NAME: &'static str = "Admin";

    /// Parse a login name.
    ///
    /// Accepts exactly `"Admin"`, or one ASCII letter in either case.
    pub fn parse(name: &str) -> Result<Self, LibraryError> {
        if name == Self::ADMIN_NAME {
            return Ok(Self::Admin);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => UserLetter::new(c)
                .map(Self::User)
                .ok_or_else(|| LibraryError::InvalidLogin(name.to_string())),
            _ => Err(LibraryError::InvalidLogin(name.to_string())),
        }
    }

    /// True for the administrator.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str(Self::ADMIN_NAME),
            Self::User(letter) => write!(f, "{letter}"),
        }
    }
}

/// Current session: logged out, or logged in as one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// Logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already logged in as `identity`.
    pub fn logged_in(identity: Identity) -> Self {
        Self { identity: Some(identity) }
    }

    /// Replace the current identity. Returns the previous one.
    pub fn login(&mut self, identity: Identity) -> Option<Identity> {
        self.identity.replace(identity)
    }

    /// Log out. Returns who was logged in, `None` if nobody was.
    pub fn logout(&mut self) -> Option<Identity> {
        self.identity.take()
    }

    /// Current identity. `None` when logged out.
    pub fn identity(&self) -> Option<Identity> {
        self.identity
    }

    /// True when someone is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }
}
