use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use storefront_services::api::ApiClient;
use storefront_services::error::ServiceError;
use storefront_services::models::{Credentials, ProductInput, ProductQuery};
use storefront_services::session::Session;
use storefront_theme::preference::{MemoryPreferenceStore, Preferences, AUTH_TOKEN_KEY, USER_KEY};

/// Accept one connection, answer it with `status` and `body`, and return the raw request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{}", addr), handle)
}

/// A client for the local responder that ignores proxy settings of the environment.
fn client(url: &str) -> ApiClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ApiClient::new(url).unwrap().with_http_client(http)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&data[..end]).to_string();
            let length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

#[tokio::test]
async fn test_login_sends_credentials_and_keeps_token() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"message":"Login successful","token":"t0k","user":{"id":"u1","name":"ana","email":"ana@example.com","role":"seller","isActive":true}}"#,
    )
    .await;

    let mut client = client(&url);
    let response = client.login(&Credentials::new("ana", "secret")).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /auth/login HTTP/1.1"));
    assert!(request.contains(r#""username_or_email":"ana""#));
    assert_eq!(response.user.unwrap().role, "seller");
    assert_eq!(client.token(), Some("t0k"));
}

#[tokio::test]
async fn test_search_omits_empty_filters() {
    let (url, server) = serve_once("200 OK", r#"[{"id":"p1","name":"Runner","price":49.0}]"#).await;

    let client = client(&url);
    let query = ProductQuery::text("shoe").with_category("").with_price_range(None, Some(50.0));
    let products = client.search_products(&query).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/products/search?q=shoe&max_price=50 HTTP/1.1"));
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Runner");
}

#[tokio::test]
async fn test_error_status_carries_backend_message() {
    let (url, server) = serve_once("404 Not Found", r#"{"error":"Product not found"}"#).await;

    let client = client(&url);
    let error = client.product("missing").await.unwrap_err();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/products/missing HTTP/1.1"));
    assert!(matches!(error, ServiceError::Status { status: 404, .. }));
    assert_eq!(error.user_message(), "Product not found");
}

#[tokio::test]
async fn test_product_writes_are_authenticated() {
    let product = ProductInput {
        name: "Mug".to_string(),
        description: "Stoneware".to_string(),
        price: 12.5,
        stock: 3,
        category_id: "c1".to_string(),
    };

    let anonymous = ApiClient::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        anonymous.create_product(&product).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(anonymous.delete_product("p1").await, Err(ServiceError::NotAuthenticated)));

    let (url, server) = serve_once("200 OK", r#"{"id":"p1","name":"Mug","price":12.5,"stock":3}"#).await;
    let client = client(&url).with_token("t0k");
    let updated = client.update_product("p1", &product).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("PUT /api/products/p1 HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer t0k"));
    assert_eq!(updated.stock, 3);
}

#[tokio::test]
async fn test_categories_use_trailing_slash() {
    let (url, server) = serve_once("200 OK", r#"[{"id":"c1","name":"Shoes"},{"id":"c2","name":"Bags"}]"#).await;

    let client = client(&url);
    let categories = client.categories().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /categories/ HTTP/1.1"));
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn test_session_persists_and_clears_token_and_user() {
    let store = MemoryPreferenceStore::new();

    let (url, server) = serve_once(
        "200 OK",
        r#"{"message":"Login successful","token":"t0k","user":{"id":"u1","name":"ana","email":"ana@example.com","role":"customer","isActive":true}}"#,
    )
    .await;
    let mut session = Session::new(client(&url), Preferences::new(store.clone()));
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    session.login(&Credentials::new("ana", "secret")).await.unwrap();
    server.await.unwrap();
    assert_eq!(store.snapshot(AUTH_TOKEN_KEY).as_deref(), Some("t0k"));
    assert!(store.snapshot(USER_KEY).is_some());

    let (url, server) = serve_once("200 OK", r#"{"authenticated":true,"userId":"u1"}"#).await;
    let restored = Session::new(client(&url), Preferences::new(store.clone()));
    assert!(restored.is_authenticated());
    let user = restored.user().unwrap();
    assert_eq!((user.id.as_str(), user.role.as_str()), ("u1", "customer"));
    let status = restored.client().status().await.unwrap();
    let request = server.await.unwrap();
    assert!(request.to_ascii_lowercase().contains("authorization: bearer t0k"));
    assert_eq!(status.user_id.as_deref(), Some("u1"));

    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let mut failing = Session::new(client(&url), Preferences::new(store.clone()));
    assert!(failing.logout().await.is_err());
    server.await.unwrap();
    assert_eq!(store.snapshot(AUTH_TOKEN_KEY), None);
    assert_eq!(store.snapshot(USER_KEY), None);
    assert!(failing.user().is_none());
    assert!(!failing.is_authenticated());
}
