use atrium_core::UserId;

/// Caller context for a request (authenticated identity).
///
/// This is immutable and must be present for all protected routes. Roles are
/// not part of it: a role only exists relative to the organization a request
/// targets, so handlers resolve it from the membership store per request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallerContext {
    user_id: UserId,
}

impl CallerContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
