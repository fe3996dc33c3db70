use crate::{
    api::{ApiClient, ApiError, LoginRequest},
    state::{
        gate::AuthGate,
        reconciler::{LoginReconciliation, PostLoginReconciler},
        redirect::RedirectMemory,
        session::{self, CookieSessionStore, SessionState},
    },
    utils::{navigation::BrowserNavigator, storage::LocalStorage},
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
}

/// Everything the auth flow needs, wired once and shared through context.
#[derive(Clone)]
pub struct AuthServices {
    pub gate: AuthGate,
    pub api: ApiClient,
}

impl AuthServices {
    pub fn new(gate: AuthGate, api: ApiClient) -> Self {
        Self {
            api: api.with_auth_gate(gate.clone()),
            gate,
        }
    }

    pub fn browser() -> Self {
        let gate = AuthGate::new(
            SessionState::new(CookieSessionStore::default()),
            RedirectMemory::new(LocalStorage),
            BrowserNavigator,
        );
        Self::new(gate, ApiClient::new())
    }

    pub fn reconciler(&self) -> PostLoginReconciler<ApiClient> {
        PostLoginReconciler::new(self.gate.clone(), self.api.clone())
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let services = use_auth_services();
    let (auth_state, set_auth_state) = create_signal(AuthState {
        is_authenticated: services.gate.session().is_authenticated(),
    });
    provide_context(services);
    provide_context::<AuthContext>((auth_state, set_auth_state));
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_auth_services() -> AuthServices {
    use_context::<AuthServices>().unwrap_or_else(AuthServices::browser)
}

pub async fn login_request(
    request: LoginRequest,
    explicit_redirect: Option<String>,
    services: &AuthServices,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<LoginReconciliation, ApiError> {
    services.api.login(request).await?;
    let outcome = services
        .reconciler()
        .handle_login_success(explicit_redirect.as_deref())
        .await;
    set_auth_state.update(|state| state.is_authenticated = true);
    Ok(outcome)
}

pub fn logout(services: &AuthServices, set_auth_state: WriteSignal<AuthState>) {
    let navigator = services.gate.navigator();
    session::logout(
        services.gate.session(),
        services.gate.redirect_memory(),
        navigator.as_ref(),
    );
    set_auth_state.update(|state| state.is_authenticated = false);
}

pub fn use_login_action(
) -> Action<(LoginRequest, Option<String>), Result<LoginReconciliation, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let services = use_auth_services();

    create_action(move |input: &(LoginRequest, Option<String>)| {
        let (request, redirect) = input.clone();
        let services = services.clone();
        async move { login_request(request, redirect, &services, set_auth).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_auth, set_auth) = use_auth();
    let services = use_auth_services();
    Callback::new(move |_| logout(&services, set_auth))
}
