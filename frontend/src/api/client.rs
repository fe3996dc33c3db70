use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use storefront_common::SessionCookies;

use crate::{
    api::types::*,
    config,
    state::{gate::AuthGate, reconciler::RequestReplayer},
};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    gate: Option<AuthGate>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            gate: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            gate: None,
        }
    }

    /// Without a gate, 401 responses are reported to the caller but nothing is
    /// queued and no login redirect happens.
    pub fn with_auth_gate(mut self, gate: AuthGate) -> Self {
        self.gate = Some(gate);
        self
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn access_token(&self) -> Option<String> {
        self.gate
            .as_ref()
            .and_then(|gate| gate.session().access_token())
    }

    async fn build(&self, request: &PendingRequest) -> Result<RequestBuilder, ApiError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ApiError::unknown(format!("Unsupported method {}", request.method)))?;
        let base_url = self.resolved_base_url().await;
        let mut builder = self
            .client
            .request(method, format!("{}{}", base_url, request.url));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.access_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(with_credentials(builder))
    }

    async fn dispatch(&self, request: &PendingRequest) -> Result<Response, ApiError> {
        self.build(request)
            .await?
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    /// Sends a call that needs a session. A 401 hands the request to the auth
    /// gate for replay after login and surfaces as a generic "please log in".
    async fn send_authorized<T: DeserializeOwned>(
        &self,
        request: PendingRequest,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(&request).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            match &self.gate {
                Some(gate) => gate.reject_request(request),
                None => log::warn!("{} {} unauthorized", request.method, request.url),
            }
            return Err(ApiError::unauthorized());
        }
        read_envelope(response).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = with_credentials(
            self.client
                .post(format!("{}/auth/login", base_url))
                .json(&request),
        )
        .send()
        .await
        .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let tokens: LoginResponse = read_envelope(response).await?;
        if let Some(gate) = &self.gate {
            gate.session().establish(&SessionCookies::logged_in(
                tokens.access_token.clone(),
                tokens.refresh_token.clone(),
            ));
        }
        Ok(tokens)
    }

    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<Value, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::unknown(format!("Failed to encode request: {}", e)))?;
        self.send_authorized(PendingRequest::new(
            "POST",
            "/cart/add-cart",
            Some(body),
            Vec::new(),
        ))
        .await
    }

    pub async fn add_to_wishlist(&self, product_id: &str) -> Result<Value, ApiError> {
        self.send_authorized(PendingRequest::new(
            "POST",
            "/wishlist/add",
            Some(json!({ "productId": product_id })),
            Vec::new(),
        ))
        .await
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.send_authorized(PendingRequest::new("GET", "/user/profile", None, Vec::new()))
            .await
    }
}

impl RequestReplayer for ApiClient {
    async fn replay(&self, request: &PendingRequest) -> Result<Value, ApiError> {
        let response = self.dispatch(request).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::unauthorized());
        }
        read_envelope(response).await
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let envelope: ApiEnvelope<Value> = response
        .json()
        .await
        .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?;

    if !(status.is_success() && envelope.success) {
        return Err(ApiError::rejected(envelope.message.unwrap_or_else(|| {
            format!("Request failed with status {}", status.as_u16())
        })));
    }
    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
}
