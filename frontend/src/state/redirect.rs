use std::rc::Rc;

use storefront_common::routes::{is_login_route, sanitize_redirect};

use crate::{
    api::PendingRequest,
    utils::storage::{KeyValueStore, StorageError},
};

pub use storefront_common::routes::is_protected_route;

const REDIRECT_KEY: &str = "redirectAfterLogin";
const PENDING_REQUESTS_KEY: &str = "pendingRequests";

/// Single-slot destination plus the queue of requests to replay after login.
/// Every storage failure degrades to a no-op: losing the destination only
/// means the user lands on the home page.
#[derive(Clone)]
pub struct RedirectMemory {
    store: Rc<dyn KeyValueStore>,
}

impl RedirectMemory {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    /// Last write wins. The login page itself and anything that is not a
    /// same-origin path is refused.
    pub fn store_redirect_url(&self, path: &str) -> bool {
        if is_login_route(path) {
            log::debug!("refusing to remember the login page as a redirect target");
            return false;
        }
        let Some(target) = sanitize_redirect(path) else {
            log::debug!("refusing to remember redirect target {:?}", path);
            return false;
        };
        match self.store.set_item(REDIRECT_KEY, &target) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("redirect target not saved: {}", err);
                false
            }
        }
    }

    pub fn take_redirect_url(&self) -> Option<String> {
        let raw = self.take(REDIRECT_KEY)?;
        sanitize_redirect(&raw)
    }

    pub fn push_pending_request(&self, request: PendingRequest) {
        let mut queue = match self.read_queue() {
            Ok(queue) => queue,
            Err(err) => {
                log::warn!("pending request queue unreadable, starting over: {}", err);
                Vec::new()
            }
        };
        log::info!(
            "queued {} {} as {} for replay after login",
            request.method,
            request.url,
            request.id
        );
        queue.push(request);
        let saved = serde_json::to_string(&queue)
            .map_err(|err| StorageError::Malformed(err.to_string()))
            .and_then(|raw| self.store.set_item(PENDING_REQUESTS_KEY, &raw));
        if let Err(err) = saved {
            log::warn!("pending request not saved: {}", err);
        }
    }

    /// Returns the whole queue in FIFO order and empties it.
    pub fn take_pending_requests(&self) -> Vec<PendingRequest> {
        let Some(raw) = self.take(PENDING_REQUESTS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("discarding malformed pending request queue: {}", err);
            Vec::new()
        })
    }

    pub fn clear_all(&self) {
        for key in [REDIRECT_KEY, PENDING_REQUESTS_KEY] {
            if let Err(err) = self.store.remove_item(key) {
                log::warn!("failed to clear {}: {}", key, err);
            }
        }
    }

    fn read_queue(&self) -> Result<Vec<PendingRequest>, StorageError> {
        match self.store.get_item(PENDING_REQUESTS_KEY)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|err| StorageError::Malformed(err.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    // A value only counts as taken once it is gone from storage; otherwise it
    // could be handed out a second time.
    fn take(&self, key: &str) -> Option<String> {
        let value = match self.store.get_item(key) {
            Ok(value) => value?,
            Err(err) => {
                log::warn!("failed to read {}: {}", key, err);
                return None;
            }
        };
        match self.store.remove_item(key) {
            Ok(()) => Some(value),
            Err(err) => {
                log::warn!("failed to clear {}: {}", key, err);
                None
            }
        }
    }
}
