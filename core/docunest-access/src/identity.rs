//! Caller identity.

use crate::error::{AccessError, AccessResult};
use docunest_model::DocumentRecord;
use docunest_types::UserId;

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    User(UserId),
}

impl Caller {
    pub fn user(id: UserId) -> Self {
        Caller::User(id)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Caller::User(id) => Some(id),
            Caller::Anonymous => None,
        }
    }

    #[must_use]
    pub fn owns(&self, record: &DocumentRecord) -> bool {
        self.user_id().is_some_and(|id| record.is_owned_by(id))
    }

    /// The signed-in user, or [`AccessError::Unauthenticated`].
    pub fn require_user(&self) -> AccessResult<&UserId> {
        self.user_id().ok_or(AccessError::Unauthenticated)
    }
}

impl From<Option<UserId>> for Caller {
    fn from(id: Option<UserId>) -> Self {
        id.map_or(Caller::Anonymous, Caller::User)
    }
}

/// Resolves the caller of a transport-level request.
///
/// Implementations never fail: a missing or unusable credential is an
/// anonymous caller.
pub trait IdentityProvider: Send + Sync {
    type Request: ?Sized;

    fn current_caller(&self, request: &Self::Request) -> Caller;
}
