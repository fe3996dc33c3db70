use crate::{
    api::{ApiError, UserProfile},
    components::{
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner},
    },
    state::auth::use_auth_services,
};
use leptos::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_auth_services().api;
    let profile = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.get_profile().await }
        },
    );

    view! {
        <Layout>
            <h1 class="text-2xl font-bold text-fg mb-4">"Your profile"</h1>
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || profile.get().map(render_profile)}
            </Suspense>
        </Layout>
    }
}

fn render_profile(result: Result<UserProfile, ApiError>) -> View {
    match result {
        Ok(user) => view! {
            <dl class="space-y-2">
                <div>
                    <dt class="text-sm text-fg-muted">"Name"</dt>
                    <dd class="text-fg">{user.name}</dd>
                </div>
                <div>
                    <dt class="text-sm text-fg-muted">"Email"</dt>
                    <dd class="text-fg">{user.email}</dd>
                </div>
            </dl>
        }
        .into_view(),
        Err(err) => {
            let error = create_rw_signal(Some(err));
            view! { <InlineErrorMessage error=error.into() /> }.into_view()
        }
    }
}
