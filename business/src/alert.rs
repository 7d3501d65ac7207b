//! One-shot confirmation alert shared by the account flows.

use crate::Route;

/// Deferred work to run once the user acknowledges the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Navigate(Route),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertState {
    pub is_open: bool,
    pub title: String,
    pub message: String,
    pub on_close: Option<AlertAction>,
}

impl AlertState {
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.is_open = true;
        self.title = title.into();
        self.message = message.into();
        self.on_close = None;
    }

    pub fn show_then(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_close: AlertAction,
    ) {
        self.show(title, message);
        self.on_close = Some(on_close);
    }

    /// Closes the alert and hands back its deferred action, if any.
    ///
    /// Title and message are left in place; only `is_open` and the action are
    /// reset.
    pub fn close(&mut self) -> Option<AlertAction> {
        self.is_open = false;
        self.on_close.take()
    }
}
