//! Who is asking: session lookup and elevated-role resolution.
//!
//! Curation and listing management are only offered to [`Actor::Elevated`].
//! Anything else simply does not get the feature; it is not an error.

use std::future::Future;

use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// The signed-in user behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: DbId,
}

/// Answers role-membership questions for a user.
pub trait RoleProvider: Send + Sync {
    fn has_role(
        &self,
        user_id: DbId,
        role: &str,
    ) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    Member { user_id: DbId },
    Elevated { user_id: DbId },
}

impl Actor {
    pub fn is_elevated(&self) -> bool {
        matches!(self, Actor::Elevated { .. })
    }

    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Actor::Anonymous => None,
            Actor::Member { user_id } | Actor::Elevated { user_id } => Some(*user_id),
        }
    }
}

/// Resolve the actor for the current session by asking the role provider.
pub async fn resolve_actor<P: RoleProvider>(session: Option<&Session>, provider: &P) -> Actor {
    let Some(session) = session else {
        return Actor::Anonymous;
    };
    if provider.has_role(session.user_id, ROLE_ADMIN).await {
        Actor::Elevated {
            user_id: session.user_id,
        }
    } else {
        Actor::Member {
            user_id: session.user_id,
        }
    }
}
