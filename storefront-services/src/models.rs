//! JSON bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

/// Sign-in request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Username or e-mail address.
    pub username_or_email: String,
    /// Plain password, sent over the configured transport.
    pub password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.into(),
            password: password.into(),
        }
    }
}

/// Signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: String,
    /// Role, e.g. `admin`, `seller` or `customer`.
    pub role: String,
    /// Whether the account is active.
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// Response to a sign-in request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Status message.
    #[serde(default)]
    pub message: String,
    /// The signed-in user.
    pub user: Option<User>,
    /// Session token for authenticated requests.
    pub token: Option<String>,
}

/// Response to a session status request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    /// Whether the session token is valid.
    pub authenticated: bool,
    /// Id of the signed-in user.
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// A message-only response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    /// Status message.
    pub message: String,
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A product as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Id of the selling user.
    #[serde(default)]
    pub seller_id: String,
    /// Id of the product's category.
    #[serde(default)]
    pub category_id: String,
    /// The product's category, when expanded by the backend.
    #[serde(default)]
    pub category: Option<Category>,
    /// Creation time as sent by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time as sent by the backend.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields of a product that sellers create or edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInput {
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock: i64,
    /// Id of the product's category.
    pub category_id: String,
}

/// Product search filters. Unset or empty filters are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Free text search.
    pub query: Option<String>,
    /// Category name or id.
    pub category: Option<String>,
    /// Lowest price.
    pub min_price: Option<f64>,
    /// Highest price.
    pub max_price: Option<f64>,
}

impl ProductQuery {
    /// Search for `query`.
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Restrict to a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a price range. Either bound may be omitted.
    #[must_use]
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Query parameters in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(query) = self.query.as_deref().filter(|q| !q.trim().is_empty()) {
            params.push(("q", query.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            params.push(("category", category.to_string()));
        }
        if let Some(min) = self.min_price.filter(|p| *p > 0.0) {
            params.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price.filter(|p| *p > 0.0) {
            params.push(("max_price", max.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_are_omitted() {
        assert!(ProductQuery::default().params().is_empty());
        assert!(ProductQuery::text("  ").with_price_range(Some(0.0), None).params().is_empty());
    }

    #[test]
    fn test_params_in_order() {
        let query = ProductQuery::text("shoe")
            .with_category("footwear")
            .with_price_range(Some(10.0), Some(99.5));
        assert_eq!(
            query.params(),
            vec![
                ("q", "shoe".to_string()),
                ("category", "footwear".to_string()),
                ("min_price", "10".to_string()),
                ("max_price", "99.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let product: Product = serde_json::from_str(r#"{"id":"p1","name":"Mug","price":12.5}"#).unwrap();
        assert_eq!(product.stock, 0);
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_login_response_shape() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"message":"Login successful","token":"t0k","user":{"id":"u1","name":"ana","email":"a@x","role":"seller","isActive":true}}"#,
        )
        .unwrap();
        assert_eq!(response.token.as_deref(), Some("t0k"));
        assert!(response.user.unwrap().is_active);
    }
}
