//! HTTP transport layer for the Pennylane SDK.

use crate::config::ClientConfig;
use crate::error::{PennylaneError, PennylaneResult};
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// HTTP transport for making API requests.
///
/// Cloning is cheap and every clone shares the same underlying connection
/// pool. [`HttpTransport::close`] releases that pool for all clones at once.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Arc<RwLock<Option<Client>>>,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> PennylaneResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|_| PennylaneError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| PennylaneError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(RwLock::new(Some(client))),
            config,
        })
    }

    /// Build a URL for the given path.
    ///
    /// The path is appended to the base URL rather than resolved against it,
    /// so the base URL's own path segments are always kept.
    fn build_url(&self, path: &str) -> PennylaneResult<url::Url> {
        let url = format!(
            "{}/{}",
            self.config.base_url(),
            path.trim_start_matches('/')
        );
        Ok(url::Url::parse(&url)?)
    }

    fn request(&self, method: Method, path: &str) -> PennylaneResult<RequestBuilder> {
        let client = self
            .client
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or_else(PennylaneError::closed)?;

        let url = self.build_url(path)?;
        debug!(method = %method, url = %url, "Pennylane request");
        Ok(client.request(method, url))
    }

    /// Send a request once and decode its JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> PennylaneResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Pennylane API error");
            return Err(PennylaneError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(PennylaneError::Decode);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(PennylaneError::Decode)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PennylaneResult<T> {
        let request = self.request(Method::GET, path)?;
        self.execute(request).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> PennylaneResult<T> {
        let request = self.request(Method::GET, path)?.query(query);
        self.execute(request).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> PennylaneResult<T> {
        let request = self.request(Method::POST, path)?.json(body);
        self.execute(request).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> PennylaneResult<T> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    /// Execute a PUT request without a body (state transitions).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> PennylaneResult<T> {
        let request = self.request(Method::PUT, path)?;
        self.execute(request).await
    }

    /// Execute a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> PennylaneResult<T> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request).await
    }

    /// Release the connection pool. Later requests fail with a transport error.
    ///
    /// Returns `false` if the transport was already closed.
    pub fn close(&self) -> bool {
        match self.client.write() {
            Ok(mut guard) => guard.take().is_some(),
            Err(poisoned) => poisoned.into_inner().take().is_some(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.client
            .read()
            .map(|guard| guard.is_none())
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    #[derive(Debug, Serialize)]
    struct TestRequest {
        name: String,
    }

    fn create_transport(base_url: &str) -> HttpTransport {
        let config = ClientConfig::new("sk-test-key", base_url).unwrap();
        HttpTransport::new(Arc::new(config)).unwrap()
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "success".to_string(),
                value: 42,
            }))
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: TestResponse = transport.get("/api/test").await.unwrap();
        assert_eq!(result.message, "success");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customers"))
            .and(query_param("limit", "20"))
            .and(query_param("sort", "-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: Value = transport
            .get_with_query("customers", &[("limit", "20"), ("sort", "-id")])
            .await
            .unwrap();
        assert_eq!(result, json!({"items": []}));
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/create"))
            .and(body_json(json!({"name": "test"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(TestResponse {
                message: "created".to_string(),
                value: 1,
            }))
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let request = TestRequest {
            name: "test".to_string(),
        };
        let result: TestResponse = transport.post("/api/create", &request).await.unwrap();
        assert_eq!(result.message, "created");
    }

    #[tokio::test]
    async fn test_default_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/protected"))
            .and(header("Authorization", "Bearer sk-test-key"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: Value = transport.get("protected").await.unwrap();
        assert_eq!(result["ok"], true);
    }

    #[tokio::test]
    async fn test_error_on_404_carries_body_and_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customer_invoices/999"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: PennylaneResult<Value> = transport.get("customer_invoices/999").await;
        match result {
            Err(err @ PennylaneError::Api { .. }) => {
                assert_eq!(err.to_string(), "API error: 404 - Not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_on_500_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: PennylaneResult<Value> = transport.post("transactions", &json!({})).await;
        assert_eq!(result.unwrap_err().status(), Some(503));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: PennylaneResult<Value> = transport.get("broken").await;
        assert!(matches!(result, Err(PennylaneError::Decode(_))));
    }

    #[tokio::test]
    async fn test_no_content_decodes_to_null() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/customer_invoices/1/matched_transactions/2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: Value = transport
            .delete("customer_invoices/1/matched_transactions/2")
            .await
            .unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn test_put_empty_sends_no_body() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/customer_invoices/7/finalize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());

        let result: Value = transport
            .put_empty("customer_invoices/7/finalize")
            .await
            .unwrap();
        assert_eq!(result["id"], 7);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::new("sk-test-key", server.uri())
            .unwrap()
            .with_timeout(Duration::from_millis(50));
        let transport = HttpTransport::new(Arc::new(config)).unwrap();

        let result: PennylaneResult<Value> = transport.get("slow").await;
        assert!(result.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let transport = create_transport("http://127.0.0.1:9");

        let result: PennylaneResult<Value> = transport.get("customers").await;
        assert!(result.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn test_requests_after_close_fail_fast() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri());
        let clone = transport.clone();

        assert!(transport.close());
        assert!(!transport.close());
        assert!(clone.is_closed());

        let result: PennylaneResult<Value> = clone.get("customers").await;
        let err = result.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Request failed: client is closed");
    }

    #[test]
    fn test_build_url() {
        let transport = create_transport("http://localhost:8080/api/external/v2");

        let url = transport.build_url("/customer_invoices").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/external/v2/customer_invoices"
        );
    }

    #[test]
    fn test_build_url_with_trailing_slash() {
        let transport = create_transport("http://localhost:8080/api/external/v2/");

        let url = transport.build_url("customers/12").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/external/v2/customers/12");
    }
}
