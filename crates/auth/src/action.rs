use serde::{Deserialize, Serialize};

/// Verb describing an operation a user attempts on a subject.
///
/// Closed set known at compile time. The "manage everything" wildcard of the
/// rule table is not an action; it is [`crate::ActionSelector::Any`], so
/// queries always name a concrete verb.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Invite,
    TransferOwnership,
    Export,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Invite,
        Action::TransferOwnership,
        Action::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Invite => "invite",
            Action::TransferOwnership => "transfer_ownership",
            Action::Export => "export",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
