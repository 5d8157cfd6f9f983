use atrium_auth::Permissions;

use crate::store::Store;

/// Shared application state handed to every handler.
///
/// The permission facade wraps the rule table constructed once here; nothing
/// mutates it afterwards.
pub struct AppServices {
    pub store: Store,
    pub permissions: Permissions,
}

pub fn build_services() -> AppServices {
    AppServices {
        store: Store::new(),
        permissions: Permissions::standard(),
    }
}
