//! Role-based authorisation for callers of the engine.
//!
//! A single [`authorize`] function turns an `Authorization` header into a
//! [`UserContext`] or an [`AuthError`]. Session verification and user lookup
//! sit behind the [`SessionVerifier`] and [`UserDirectory`] traits so the
//! identity provider and the user store stay outside this crate.
//!
//! # Examples
//! ```
//! use campus_core::{AuthError, Role, SessionVerifier, UserContext, UserDirectory, authorize};
//!
//! struct OneSession;
//!
//! impl SessionVerifier for OneSession {
//!     fn verify(&self, token: &str) -> Result<String, AuthError> {
//!         match token {
//!             "tok" => Ok("user_1".into()),
//!             _ => Err(AuthError::InvalidToken),
//!         }
//!     }
//! }
//!
//! struct OneAdmin;
//!
//! impl UserDirectory for OneAdmin {
//!     fn find_by_subject(&self, subject: &str) -> Result<Option<UserContext>, AuthError> {
//!         Ok((subject == "user_1").then(|| UserContext {
//!             user_id: 1,
//!             subject: subject.into(),
//!             role: Role::Admin,
//!             student_id: None,
//!         }))
//!     }
//! }
//!
//! let user = authorize(&OneSession, &OneAdmin, Some("Bearer tok"), Role::Admin)
//!     .expect("admin session");
//! assert_eq!(user.user_id, 1);
//! assert_eq!(
//!     authorize(&OneSession, &OneAdmin, Some("Bearer tok"), Role::Student),
//!     Err(AuthError::Forbidden)
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::StudentId;

const BEARER_PREFIX: &str = "Bearer ";

/// Roles a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A student browsing and responding to events.
    Student,
    /// An administrator managing events.
    Admin,
}

impl Role {
    /// Return the role as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("unknown role '{s}'")),
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    /// Internal user identifier.
    pub user_id: u64,
    /// Subject issued by the identity provider.
    pub subject: String,
    /// Role granted to the user.
    pub role: Role,
    /// Linked student record, if any.
    pub student_id: Option<StudentId>,
}

/// Reasons a request was not authorised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer token accompanied the request.
    #[error("missing authorization header")]
    MissingCredentials,
    /// The identity provider rejected the token.
    #[error("invalid session token")]
    InvalidToken,
    /// The caller is unknown or lacks the required role.
    #[error("forbidden")]
    Forbidden,
    /// The user directory could not be queried.
    #[error("user directory lookup failed: {0}")]
    Directory(String),
}

/// Verify a session token with the identity provider.
pub trait SessionVerifier {
    /// Return the subject the token was issued to.
    ///
    /// # Errors
    /// Any error is reported to callers of [`authorize`] as
    /// [`AuthError::InvalidToken`].
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}

/// Look up users by identity-provider subject.
pub trait UserDirectory {
    /// Return the user linked to `subject`, if any.
    ///
    /// # Errors
    /// Returns [`AuthError::Directory`] when the backing store fails.
    fn find_by_subject(&self, subject: &str) -> Result<Option<UserContext>, AuthError>;
}

/// Authorise a request that requires `required` role.
///
/// `authorization` is the raw `Authorization` header value; a leading
/// `Bearer ` is stripped. Roles must match exactly: an administrator does not
/// pass a student-only check.
///
/// # Errors
/// - [`AuthError::MissingCredentials`] when the header is absent or empty.
/// - [`AuthError::InvalidToken`] when the verifier rejects the token.
/// - [`AuthError::Forbidden`] when no user is linked to the subject or the
///   user holds a different role.
/// - [`AuthError::Directory`] when the directory lookup fails.
pub fn authorize(
    verifier: &dyn SessionVerifier,
    directory: &dyn UserDirectory,
    authorization: Option<&str>,
    required: Role,
) -> Result<UserContext, AuthError> {
    let header = authorization.ok_or(AuthError::MissingCredentials)?;
    let token = header.strip_prefix(BEARER_PREFIX).unwrap_or(header).trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let subject = verifier
        .verify(token)
        .map_err(|_| AuthError::InvalidToken)?;
    let Some(user) = directory.find_by_subject(&subject)? else {
        debug!("no user linked to subject {subject}");
        return Err(AuthError::Forbidden);
    };
    if user.role != required {
        debug!(
            "user {} holds role {} but {} is required",
            user.user_id, user.role, required
        );
        return Err(AuthError::Forbidden);
    }
    Ok(user)
}
