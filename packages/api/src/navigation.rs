//! Client-side navigation seam. The client only ever navigates on its own to
//! send the user back to [`SIGN_IN_PATH`] after a 401.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const SIGN_IN_PATH: &str = "/sign-in";

pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Navigator that only logs the redirect.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        tracing::info!(path, "redirect requested");
    }
}

/// Navigator that records every path it was sent to. Clones share history.
#[derive(Clone, Debug, Default)]
pub struct History {
    paths: Arc<Mutex<Vec<String>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    fn paths_mut(&self) -> MutexGuard<'_, Vec<String>> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths_mut().clone()
    }

    /// The most recent redirect target.
    pub fn current(&self) -> Option<String> {
        self.paths_mut().last().cloned()
    }
}

impl Navigator for History {
    fn redirect(&self, path: &str) {
        tracing::debug!(path, "redirect");
        self.paths_mut().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_records_in_order() {
        let history = History::new();
        let shared = history.clone();
        assert!(history.current().is_none());

        shared.redirect("/workspace");
        shared.redirect(SIGN_IN_PATH);

        assert_eq!(history.paths(), vec!["/workspace", "/sign-in"]);
        assert_eq!(history.current().as_deref(), Some("/sign-in"));
    }
}
