use std::rc::Rc;

use crate::{
    api::{AddToCartRequest, ApiError},
    components::{
        error::InlineErrorMessage,
        layout::{Layout, SuccessMessage},
    },
    state::auth::use_auth_services,
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: u32,
}

pub const FEATURED_PRODUCTS: &[Product] = &[
    Product {
        id: "p-100",
        name: "Linen Shirt",
        price_cents: 4_900,
    },
    Product {
        id: "p-200",
        name: "Canvas Tote",
        price_cents: 2_500,
    },
    Product {
        id: "p-300",
        name: "Wool Beanie",
        price_cents: 1_800,
    },
];

pub fn format_price(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let services = use_auth_services();
    let error = create_rw_signal(None::<ApiError>);
    let notice = create_rw_signal(None::<String>);

    // Guests are sent to the login page before any request goes out.
    let api = services.api.clone();
    let add_to_cart = Rc::new(services.gate.require_auth(move |product: Product| {
        let api = api.clone();
        error.set(None);
        spawn_local(async move {
            let request = AddToCartRequest {
                product_id: product.id.to_string(),
                quantity: 1,
                variant_id: None,
            };
            match api.add_to_cart(&request).await {
                Ok(_) => notice.set(Some(format!("{} added to cart", product.name))),
                Err(err) => error.set(Some(err)),
            }
        });
    }));

    let api = services.api.clone();
    let add_to_wishlist = Rc::new(services.gate.require_auth(move |product: Product| {
        let api = api.clone();
        error.set(None);
        spawn_local(async move {
            match api.add_to_wishlist(product.id).await {
                Ok(_) => notice.set(Some(format!("{} saved to wishlist", product.name))),
                Err(err) => error.set(Some(err)),
            }
        });
    }));

    view! {
        <Layout>
            <h1 class="text-3xl font-extrabold text-fg mb-6">"Featured"</h1>
            <InlineErrorMessage error=error.into() />
            {move || notice.get().map(|message| view! { <SuccessMessage message=message /> })}
            <ul class="grid gap-4 sm:grid-cols-3">
                {FEATURED_PRODUCTS
                    .iter()
                    .copied()
                    .map(|product| {
                        let add_to_cart = Rc::clone(&add_to_cart);
                        let add_to_wishlist = Rc::clone(&add_to_wishlist);
                        view! {
                            <li class="p-4 rounded-md border border-border">
                                <a href=format!("/product/{}", product.id) class="font-medium text-fg">
                                    {product.name}
                                </a>
                                <p class="text-fg-muted">{format_price(product.price_cents)}</p>
                                <div class="mt-2 flex space-x-2">
                                    <button
                                        class="px-3 py-1 rounded-md text-action-primary-text bg-action-primary-bg"
                                        on:click=move |_| {
                                            add_to_cart(product);
                                        }
                                    >
                                        "Add to cart"
                                    </button>
                                    <button
                                        class="px-3 py-1 rounded-md text-fg-muted"
                                        on:click=move |_| {
                                            add_to_wishlist(product);
                                        }
                                    >
                                        "Save"
                                    </button>
                                </div>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </Layout>
    }
}
