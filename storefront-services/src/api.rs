//! # Backend API Client
//!
//! Thin pass-through to the storefront backend. Every call maps to one HTTP
//! request with a JSON body; non-success statuses become
//! [ServiceError::Status] carrying the response body.
//!
//! | call | request |
//! |------|---------|
//! | [ApiClient::login] | `POST /auth/login` |
//! | [ApiClient::logout] | `POST /auth/logout` |
//! | [ApiClient::status] | `GET /auth/status` |
//! | [ApiClient::products] | `GET /api/products` |
//! | [ApiClient::product] | `GET /api/products/:id` |
//! | [ApiClient::search_products] | `GET /api/products/search` |
//! | [ApiClient::create_product] | `POST /api/products` |
//! | [ApiClient::update_product] | `PUT /api/products/:id` |
//! | [ApiClient::delete_product] | `DELETE /api/products/:id` |
//! | [ApiClient::categories] | `GET /categories/` |
//! | [ApiClient::category] | `GET /categories/:id/` |

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{AuthStatus, Category, Credentials, LoginResponse, MessageResponse, Product, ProductInput, ProductQuery};

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base,
            token: None,
        })
    }

    /// Send requests through `http`, e.g. one with custom timeouts or proxies.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Use `token` for authenticated requests.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Current session token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the session token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// URL of the endpoint made of `segments` below the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sign in. The returned token, if any, is used for later requests.
    pub async fn login(&mut self, credentials: &Credentials) -> ServiceResult<LoginResponse> {
        let request = self.request(Method::POST, &["auth", "login"])?.json(credentials);
        let response: LoginResponse = read_json(request.send().await?).await?;
        if let Some(token) = &response.token {
            log::debug!("Signed in, session token received");
            self.token = Some(token.clone());
        }
        Ok(response)
    }

    /// Sign out. The session token is dropped even if the backend call fails.
    pub async fn logout(&mut self) -> ServiceResult<MessageResponse> {
        let request = self.request(Method::POST, &["auth", "logout"])?;
        self.token = None;
        read_json(request.send().await?).await
    }

    /// Ask the backend whether the session token is valid.
    pub async fn status(&self) -> ServiceResult<AuthStatus> {
        self.get_json(&["auth", "status"]).await
    }

    /// All products.
    pub async fn products(&self) -> ServiceResult<Vec<Product>> {
        self.get_json(&["api", "products"]).await
    }

    /// The product with `id`.
    pub async fn product(&self, id: &str) -> ServiceResult<Product> {
        self.get_json(&["api", "products", id]).await
    }

    /// Products matching `query`.
    pub async fn search_products(&self, query: &ProductQuery) -> ServiceResult<Vec<Product>> {
        let request = self
            .request(Method::GET, &["api", "products", "search"])?
            .query(&query.params());
        read_json(request.send().await?).await
    }

    /// Create a product. Requires a session token.
    pub async fn create_product(&self, product: &ProductInput) -> ServiceResult<Product> {
        self.send_json(Method::POST, &["api", "products"], product).await
    }

    /// Replace the fields of the product with `id`. Requires a session token.
    pub async fn update_product(&self, id: &str, product: &ProductInput) -> ServiceResult<Product> {
        self.send_json(Method::PUT, &["api", "products", id], product).await
    }

    /// Delete the product with `id`. Requires a session token.
    pub async fn delete_product(&self, id: &str) -> ServiceResult<()> {
        let request = self.authenticated(Method::DELETE, &["api", "products", id])?;
        check_status(request.send().await?).await?;
        Ok(())
    }

    /// All categories.
    pub async fn categories(&self) -> ServiceResult<Vec<Category>> {
        self.get_json(&["categories", ""]).await
    }

    /// The category with `id`.
    pub async fn category(&self, id: &str) -> ServiceResult<Category> {
        self.get_json(&["categories", id, ""]).await
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ServiceResult<T> {
        let request = self.request(Method::GET, segments)?;
        read_json(request.send().await?).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> ServiceResult<T> {
        let request = self.authenticated(method, segments)?.json(body);
        read_json(request.send().await?).await
    }

    /// A request carrying the session token when one is set.
    fn request(&self, method: Method, segments: &[&str]) -> ServiceResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        log::trace!("{} {}", method, url);
        let request = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    /// A request that must carry the session token.
    fn authenticated(&self, method: Method, segments: &[&str]) -> ServiceResult<RequestBuilder> {
        if self.token.is_none() {
            return Err(ServiceError::NotAuthenticated);
        }
        self.request(method, segments)
    }
}

async fn check_status(response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    log::debug!("Backend returned {}: {}", status, body);
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
    Ok(check_status(response).await?.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_below_root() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.endpoint(&["api", "products"]).unwrap().as_str(), "http://localhost:8080/api/products");
        assert_eq!(client.endpoint(&["categories", ""]).unwrap().as_str(), "http://localhost:8080/categories/");
    }

    #[test]
    fn test_endpoints_below_prefix() {
        let client = ApiClient::new("https://shop.example.com/backend/").unwrap();
        assert_eq!(
            client.endpoint(&["api", "products", "42"]).unwrap().as_str(),
            "https://shop.example.com/backend/api/products/42"
        );
    }

    #[test]
    fn test_ids_are_escaped() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.endpoint(&["api", "products", "a/b c"]).unwrap().as_str(),
            "http://localhost:8080/api/products/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_unusable_base() {
        assert!(matches!(ApiClient::new("mailto:shop@example.com"), Err(ServiceError::InvalidBaseUrl(_))));
        assert!(matches!(ApiClient::new("not a url"), Err(ServiceError::Url(_))));
    }

    #[test]
    fn test_writes_require_token() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert!(matches!(
            client.authenticated(Method::DELETE, &["api", "products", "1"]),
            Err(ServiceError::NotAuthenticated)
        ));
        let client = client.with_token("t0k");
        assert!(client.authenticated(Method::DELETE, &["api", "products", "1"]).is_ok());
    }
}
