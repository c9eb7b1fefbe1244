use axum::http::HeaderMap;
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::controllers::{api, auth};
use crate::App;

/// A test application builder for integration testing.
///
/// Boots the app on an ephemeral port with an in-memory SQLite database.
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_discovery() {
///     let app = TestApp::new().await;
///     let res = app.client.get(&app.url("/api")).await;
///     assert_eq!(res.status, 200);
/// }
/// ```
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: TestClient,
    pub db: DatabaseConnection,
    pub config: Config,
}

impl TestApp {
    /// Test configuration: in-memory database, explicit secrets.
    pub fn test_config() -> Config {
        Config {
            database: "sqlite::memory:".to_string(),
            secret: "test-secret".to_string(),
            key: "sid".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0, // OS assigns a random port
            environment: "test".to_string(),
            public_dir: "public".to_string(),
            max_body_size: 1_048_576,
        }
    }

    /// Default assembly: auth and general API groups mounted under `/api`.
    pub async fn new() -> Self {
        let app = App::with_config(Self::test_config())
            .await
            .expect("Failed to create test app")
            .mount(auth::routes())
            .mount(api::routes());

        Self::from_app(app).await
    }

    /// Boot an already-assembled app (custom config or custom groups).
    pub async fn from_app(app: App) -> Self {
        let router = app.router();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to get local addr");

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestApp {
            addr,
            client: TestClient::new(addr),
            db: app.db,
            config: app.config,
        }
    }

    /// Get the base URL for the test server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Log in as `username` and return the created session id. The session
    /// cookie lands in the client's cookie store.
    pub async fn login(&self, username: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": "hunter2",
        });

        let res = self
            .client
            .post(&self.url("/api/login"), &body.to_string())
            .await;

        assert_eq!(res.status, 200, "Login failed: {}", res.body);
        res.json()["data"]["id"].as_str().unwrap().to_string()
    }
}

/// A simple HTTP test client with a cookie store and helper methods.
#[derive(Clone)]
pub struct TestClient {
    inner: reqwest::Client,
    base_addr: SocketAddr,
}

impl TestClient {
    /// Create a new test client pointing at the given address.
    pub fn new(addr: SocketAddr) -> Self {
        TestClient {
            inner: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to build test client"),
            base_addr: addr,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, url: &str) -> TestResponse {
        let res = self.inner.get(url).send().await.expect("GET request failed");
        TestResponse::from_response(res).await
    }

    /// Send a GET request with an extra header.
    pub async fn get_with_header(&self, url: &str, name: &str, value: &str) -> TestResponse {
        let res = self
            .inner
            .get(url)
            .header(name, value)
            .send()
            .await
            .expect("GET request failed");
        TestResponse::from_response(res).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, url: &str, body: &str) -> TestResponse {
        let res = self
            .inner
            .post(url)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("POST request failed");
        TestResponse::from_response(res).await
    }

    /// Send a POST request with a urlencoded form body.
    pub async fn post_form(&self, url: &str, body: &str) -> TestResponse {
        let res = self
            .inner
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("POST request failed");
        TestResponse::from_response(res).await
    }

    /// Send an OPTIONS request.
    pub async fn options(&self, url: &str) -> TestResponse {
        let res = self
            .inner
            .request(reqwest::Method::OPTIONS, url)
            .send()
            .await
            .expect("OPTIONS request failed");
        TestResponse::from_response(res).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.base_addr)
    }
}

/// A simplified HTTP response for test assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub body: String,
    pub headers: HeaderMap,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let body = res.text().await.unwrap_or_default();
        TestResponse {
            status,
            body,
            headers,
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Failed to parse response as JSON")
    }

    /// Check if the response indicates success.
    pub fn is_success(&self) -> bool {
        self.json()["success"].as_bool().unwrap_or(false)
    }

    /// Get the data field from the response.
    pub fn data(&self) -> serde_json::Value {
        self.json()["data"].clone()
    }

    /// Get the error field from the response.
    pub fn error(&self) -> serde_json::Value {
        self.json()["error"].clone()
    }

    /// A response header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}
