//! Navigation targets a flow can request.
//!
//! Flows never navigate themselves; they hand a [`Route`] back to the
//! presentation layer, usually through an alert's close action.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Login surface. Also the landing page for signed-out users.
    #[default]
    Login,
    /// Today's question, shown after a successful login.
    Home,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_default_is_login() {
        assert_eq!(Route::default(), Route::Login);
    }

    #[test]
    fn test_route_serializes_by_name() {
        let json = serde_json::to_string(&Route::Home).expect("Should serialize");
        assert_eq!(json, "\"Home\"");
    }
}
