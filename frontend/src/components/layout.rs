use crate::state::auth::{use_auth, use_logout};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let logout = use_logout();

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">"Storefront"</a>
                    <nav class="flex items-center space-x-4">
                        <a href="/" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                            "Shop"
                        </a>
                        <a href="/wishlist" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                            "Wishlist"
                        </a>
                        <a href="/profile" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                            "Profile"
                        </a>
                        <Show
                            when=move || auth.get().is_authenticated
                            fallback=|| view! {
                                <a href="/login" class="px-3 py-2 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg">
                                    "Sign in"
                                </a>
                            }
                        >
                            <button
                                class="px-3 py-2 rounded-md text-sm font-medium text-fg-muted hover:text-fg"
                                on:click=move |_| logout.call(())
                            >
                                "Sign out"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header />
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_offers_sign_in_to_guests() {
        let html = render_to_string(move || {
            provide_auth("/", false);
            view! { <Header /> }
        });
        assert!(html.contains("Sign in"));
        assert!(!html.contains("Sign out"));
    }

    #[test]
    fn header_offers_sign_out_with_session() {
        let html = render_to_string(move || {
            provide_auth("/", true);
            view! { <Header /> }
        });
        assert!(html.contains("Sign out"));
    }

    #[test]
    fn layout_renders_children_and_feedback() {
        let html = render_to_string(move || {
            provide_auth("/", false);
            view! {
                <Layout>
                    <div>"child"</div>
                    <LoadingSpinner />
                    <SuccessMessage message="Added to cart".into() />
                </Layout>
            }
        });
        assert!(html.contains("child"));
        assert!(html.contains("animate-spin"));
        assert!(html.contains("Added to cart"));
    }
}
