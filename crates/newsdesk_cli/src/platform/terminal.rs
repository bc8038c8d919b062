//! Terminal stand-ins for the dashboard's modal and router.

use std::sync::atomic::{AtomicBool, Ordering};

use newsdesk_client::{Navigator, NotificationPresenter};
use newsdesk_core::NotificationState;

/// Prints notifications to stderr as they are shown.
pub struct TerminalPresenter;

impl NotificationPresenter for TerminalPresenter {
    fn render(&self, state: &NotificationState) {
        if state.visible {
            eprintln!("[{}] {}", state.kind, state.message);
        }
    }
}

/// Records a sign-in redirect so the command can report it on exit.
#[derive(Default)]
pub struct TerminalNavigator {
    redirected: AtomicBool,
}

impl TerminalNavigator {
    pub fn redirected(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }
}

impl Navigator for TerminalNavigator {
    fn to_sign_in(&self) {
        self.redirected.store(true, Ordering::SeqCst);
        eprintln!("Sign in again with `newsdesk login --email <EMAIL>`.");
    }
}
