use super::utils::{self, LoginFormState};
use crate::api::{ApiError, LoginRequest};
use crate::state::{auth, reconciler::LoginReconciliation};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<(LoginRequest, Option<String>), Result<LoginReconciliation, ApiError>>,
}

impl LoginViewModel {
    /// Validates the form and dispatches the login. The reconciler performs
    /// navigation on success, so only failures are handled here.
    pub fn submit(&self, redirect: Option<String>) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let email = self.form.email.get_untracked();
        let password = self.form.password.get_untracked();
        if let Err(msg) = utils::validate_credentials(&email, &password) {
            self.error.set(Some(ApiError::unknown(msg)));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch((
            LoginRequest {
                email: email.trim().to_string(),
                password,
            },
            redirect,
        ));
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if let Some(Err(err)) = login_action.value().get() {
            form.password.set(String::new());
            error.set(Some(err));
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}
