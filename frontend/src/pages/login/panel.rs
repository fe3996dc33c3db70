use crate::pages::login::{components::form::LoginForm, utils, view_model::use_login_view_model};
use leptos::{ev::SubmitEvent, Callback, *};
use leptos_router::use_query_map;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let query = use_query_map();
    let pending = vm.login_action.pending();

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        let redirect = query.with_untracked(utils::redirect_from_query);
        vm.submit(redirect);
    });

    let email_input = Callback::new(move |value: String| vm.form.email.set(value));
    let password_input = Callback::new(move |value: String| vm.form.password.set(value));

    view! {
        <LoginForm
            email=vm.form.email.read_only()
            password=vm.form.password.read_only()
            error=vm.error.into()
            pending=pending.into()
            on_email_input=email_input
            on_password_input=password_input
            on_submit=handle_submit
        />
    }
}
