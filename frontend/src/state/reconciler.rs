use std::future::Future;

use futures::future::join_all;
use serde_json::Value;
use storefront_common::routes::{sanitize_redirect, HOME_ROUTE};

use crate::{
    api::{ApiError, PendingRequest},
    state::gate::AuthGate,
};

/// Sends a parked request again. Implementations must not queue a request a
/// second time when the replay itself is rejected.
pub trait RequestReplayer {
    fn replay(&self, request: &PendingRequest) -> impl Future<Output = Result<Value, ApiError>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayOutcome {
    Success,
    Failure { error: ApiError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    pub id: String,
    pub outcome: ReplayOutcome,
}

impl ReplayResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, ReplayOutcome::Success)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginReconciliation {
    pub destination: String,
    pub replays: Vec<ReplayResult>,
}

/// Runs once per successful login: restores the remembered destination,
/// replays parked requests and navigates.
///
/// Replays are best effort. By the time login completes the UI action that
/// issued them is gone, so a failure is logged and reported in the result but
/// never blocks navigation or goes back into the queue.
pub struct PostLoginReconciler<R> {
    gate: AuthGate,
    replayer: R,
}

impl<R: RequestReplayer> PostLoginReconciler<R> {
    pub fn new(gate: AuthGate, replayer: R) -> Self {
        Self { gate, replayer }
    }

    pub async fn handle_login_success(
        &self,
        explicit_redirect: Option<&str>,
    ) -> LoginReconciliation {
        self.gate.session().mark_authenticated();

        let memory = self.gate.redirect_memory();
        let destination = memory
            .take_redirect_url()
            .or_else(|| explicit_redirect.and_then(sanitize_redirect))
            .unwrap_or_else(|| HOME_ROUTE.to_string());

        let pending = memory.take_pending_requests();
        if !pending.is_empty() {
            log::info!("replaying {} request(s) after login", pending.len());
        }
        let replays = join_all(pending.iter().map(|request| self.replay_one(request))).await;

        self.gate.navigator().navigate(&destination);
        LoginReconciliation {
            destination,
            replays,
        }
    }

    async fn replay_one(&self, request: &PendingRequest) -> ReplayResult {
        let outcome = match self.replayer.replay(request).await {
            Ok(_) => {
                log::info!("replayed {} {} ({})", request.method, request.url, request.id);
                ReplayOutcome::Success
            }
            Err(error) => {
                log::warn!(
                    "replay of {} {} ({}) failed: {}",
                    request.method,
                    request.url,
                    request.id,
                    error
                );
                ReplayOutcome::Failure { error }
            }
        };
        ReplayResult {
            id: request.id.clone(),
            outcome,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::{
            redirect::RedirectMemory,
            session::{MemorySessionStore, SessionState},
        },
        utils::{
            navigation::{Navigator, RecordingNavigator},
            storage::MemoryStorage,
        },
    };
    use serde_json::json;
    use std::{
        cell::RefCell,
        pin::Pin,
        rc::Rc,
        task::{Context, Poll},
    };

    /// Yields to the executor exactly once.
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[derive(Clone, Default)]
    struct ScriptedReplayer {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl RequestReplayer for ScriptedReplayer {
        async fn replay(&self, request: &PendingRequest) -> Result<Value, ApiError> {
            self.events.borrow_mut().push(format!("start {}", request.url));
            YieldOnce(false).await;
            self.events.borrow_mut().push(format!("end {}", request.url));
            if request.url.contains("fail") {
                Err(ApiError::rejected("out of stock"))
            } else {
                Ok(json!({ "ok": true }))
            }
        }
    }

    fn setup(location: &str) -> (AuthGate, RecordingNavigator) {
        let nav = RecordingNavigator::at(location);
        let gate = AuthGate::new(
            SessionState::new(MemorySessionStore::new()),
            RedirectMemory::new(MemoryStorage::new()),
            nav.clone(),
        );
        (gate, nav)
    }

    #[tokio::test]
    async fn stored_redirect_beats_explicit_parameter() {
        let (gate, nav) = setup("/login");
        gate.redirect_memory().store_redirect_url("/profile?tab=orders");
        let reconciler = PostLoginReconciler::new(gate.clone(), ScriptedReplayer::default());

        let result = reconciler.handle_login_success(Some("/checkout")).await;

        assert_eq!(result.destination, "/profile?tab=orders");
        assert_eq!(nav.last_visited().as_deref(), Some("/profile?tab=orders"));
        assert_eq!(gate.redirect_memory().take_redirect_url(), None);
    }

    #[tokio::test]
    async fn explicit_parameter_used_when_nothing_stored() {
        let (gate, nav) = setup("/login?redirect=%2Fcheckout");
        let reconciler = PostLoginReconciler::new(gate, ScriptedReplayer::default());

        let result = reconciler.handle_login_success(Some("/checkout")).await;

        assert_eq!(result.destination, "/checkout");
        assert_eq!(nav.last_visited().as_deref(), Some("/checkout"));
    }

    #[tokio::test]
    async fn unsafe_explicit_parameter_falls_back_home() {
        for raw in ["https://evil.example", "/login", "//evil.example"] {
            let (gate, nav) = setup("/login");
            let reconciler = PostLoginReconciler::new(gate, ScriptedReplayer::default());
            let result = reconciler.handle_login_success(Some(raw)).await;
            assert_eq!(result.destination, "/");
            assert_eq!(nav.last_visited().as_deref(), Some("/"));
        }
    }

    #[tokio::test]
    async fn marks_session_authenticated() {
        let (gate, _) = setup("/login");
        let reconciler = PostLoginReconciler::new(gate.clone(), ScriptedReplayer::default());
        reconciler.handle_login_success(None).await;
        assert!(gate.session().is_authenticated());
    }

    #[tokio::test]
    async fn failed_replay_does_not_stop_the_others_or_navigation() {
        let (gate, nav) = setup("/login");
        let memory = gate.redirect_memory();
        memory.store_redirect_url("/product/42");
        let good = PendingRequest::new("POST", "/cart/add-cart", Some(json!({"productId": "p1"})), Vec::new());
        let bad = PendingRequest::new("POST", "/wishlist/fail", None, Vec::new());
        memory.push_pending_request(bad.clone());
        memory.push_pending_request(good.clone());

        let replayer = ScriptedReplayer::default();
        let reconciler = PostLoginReconciler::new(gate.clone(), replayer.clone());
        let result = reconciler.handle_login_success(None).await;

        assert_eq!(result.destination, "/product/42");
        assert_eq!(nav.last_visited().as_deref(), Some("/product/42"));
        assert_eq!(result.replays.len(), 2);

        let bad_result = result.replays.iter().find(|r| r.id == bad.id).unwrap();
        assert_eq!(
            bad_result.outcome,
            ReplayOutcome::Failure {
                error: ApiError::rejected("out of stock")
            }
        );
        let good_result = result.replays.iter().find(|r| r.id == good.id).unwrap();
        assert!(good_result.succeeded());

        let events = replayer.events.borrow();
        assert!(events.contains(&"end /cart/add-cart".to_string()));
        assert!(events.contains(&"end /wishlist/fail".to_string()));
        assert!(gate.redirect_memory().take_pending_requests().is_empty());
    }

    #[tokio::test]
    async fn replays_are_issued_concurrently() {
        let (gate, _) = setup("/login");
        let memory = gate.redirect_memory();
        memory.push_pending_request(PendingRequest::new("POST", "/cart/add-cart", None, Vec::new()));
        memory.push_pending_request(PendingRequest::new("POST", "/wishlist/add", None, Vec::new()));

        let replayer = ScriptedReplayer::default();
        let reconciler = PostLoginReconciler::new(gate, replayer.clone());
        reconciler.handle_login_success(None).await;

        let events = replayer.events.borrow();
        let first_end = events.iter().position(|e| e.starts_with("end")).unwrap();
        let starts_before_end = events[..first_end]
            .iter()
            .filter(|e| e.starts_with("start"))
            .count();
        assert_eq!(starts_before_end, 2, "events: {:?}", *events);
    }

    #[tokio::test]
    async fn blocked_visit_resumes_after_login() {
        let (gate, nav) = setup("/profile?tab=orders");
        assert!(!gate.check());
        assert_eq!(nav.current_location().as_deref(), Some("/login"));

        let reconciler = PostLoginReconciler::new(gate.clone(), ScriptedReplayer::default());
        let result = reconciler.handle_login_success(None).await;

        assert_eq!(result.destination, "/profile?tab=orders");
        assert_eq!(nav.visited(), vec!["/login".to_string(), "/profile?tab=orders".to_string()]);
        assert!(gate.session().is_authenticated());
        assert_eq!(gate.redirect_memory().take_redirect_url(), None);
    }

    #[tokio::test]
    async fn empty_queue_goes_home() {
        let (gate, nav) = setup("/login");
        let reconciler = PostLoginReconciler::new(gate, ScriptedReplayer::default());
        let result = reconciler.handle_login_success(None).await;
        assert_eq!(result.destination, "/");
        assert!(result.replays.is_empty());
        assert_eq!(nav.visited(), vec!["/".to_string()]);
    }
}
