use std::{cell::RefCell, rc::Rc};

use super::storage::window;

pub trait Navigator {
    /// Current path plus query string, e.g. `/profile?tab=orders`.
    fn current_location(&self) -> Option<String>;
    fn navigate(&self, path: &str);
}

/// Full page navigation through `window.location`. Redirect memory lives in
/// local storage precisely because in-memory state does not survive this.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_location(&self) -> Option<String> {
        let location = window().ok()?.location();
        let pathname = location.pathname().ok()?;
        let search = location.search().unwrap_or_default();
        Some(format!("{}{}", pathname, search))
    }

    fn navigate(&self, path: &str) {
        match window() {
            Ok(win) => {
                if win.location().set_href(path).is_err() {
                    log::warn!("navigation to {} was rejected", path);
                }
            }
            Err(err) => log::warn!("cannot navigate to {}: {}", path, err),
        }
    }
}

/// In-memory navigator: starts at a given location and records every
/// navigation, moving the current location along with it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    location: Rc<RefCell<Option<String>>>,
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: Rc::new(RefCell::new(Some(location.into()))),
            visited: Rc::default(),
        }
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    pub fn last_visited(&self) -> Option<String> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> Option<String> {
        self.location.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
        *self.location.borrow_mut() = Some(path.to_string());
    }
}
