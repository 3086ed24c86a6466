//! HTTP transport layer for the Trello SDK.

use crate::config::ClientConfig;
use crate::error::{TrelloError, TrelloResult};
use crate::request::{RemoteApi, RemoteRequest};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making API requests.
///
/// Each call is a single attempt bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> TrelloResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("trello-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a URL under the API root, percent-encoding each segment.
    ///
    /// `/`, `?` and `#` inside a segment are escaped, so an ID can neither
    /// leave the API root nor add query parameters.
    fn build_url(&self, segments: &[String]) -> TrelloResult<url::Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || s.as_str() == "." || s.as_str() == "..")
        {
            return Err(TrelloError::InvalidPathSegment(bad.clone()));
        }

        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TrelloError::Config(format!("base URL cannot be a base: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a request, appending the credential pair to the query string.
    pub async fn execute(&self, request: RemoteRequest) -> TrelloResult<Value> {
        let mut url = self.build_url(&request.segments)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
            for (name, value) in self.config.credentials.query_pairs() {
                if !request.has_query(name) {
                    pairs.append_pair(name, value);
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        debug!(method = %request.method, path = %url.path(), "Trello request");

        let mut builder = self.client.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(TrelloError::from_transport)?;
        let status = response.status();
        let text = response.text().await.map_err(TrelloError::from_transport)?;

        let body: Value = serde_json::from_str(&text)
            .map_err(|_| TrelloError::remote_format(status.as_u16(), &text))?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                method = %request.method,
                path = %request.path(),
                "Trello rejected request"
            );
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl RemoteApi for HttpTransport {
    fn credentials_configured(&self) -> bool {
        self.config.credentials.is_configured()
    }

    async fn call(&self, request: RemoteRequest) -> TrelloResult<Value> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        let mut config = ClientConfig::new(url::Url::parse(base_url).unwrap());
        config.credentials = Credentials::new("test-key", "test-token");
        Arc::new(config)
    }

    fn create_config_without_credentials(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new(url::Url::parse(base_url).unwrap()))
    }

    #[tokio::test]
    async fn test_get_appends_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1/members/me/boards"))
            .and(query_param("key", "test-key"))
            .and(query_param("token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "b1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&format!("{}/1", server.uri()))).unwrap();

        let result = transport
            .execute(RemoteRequest::get(["members", "me", "boards"]))
            .await
            .unwrap();
        assert_eq!(result, json!([{"id": "b1"}]));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/cards"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "Card", "idList": "l1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .execute(RemoteRequest::post(
                ["cards"],
                json!({"name": "Card", "idList": "l1"}),
            ))
            .await
            .unwrap();
        assert_eq!(result["id"], "c1");
    }

    #[tokio::test]
    async fn test_caller_supplied_credential_is_not_duplicated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lists/l1/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();
        transport
            .execute(RemoteRequest::get(["lists", "l1", "cards"]).with_query("key", "override"))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let keys: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(keys, vec!["override".to_string()]);
        assert!(requests[0]
            .url
            .query_pairs()
            .any(|(k, v)| k == "token" && v == "test-token"));
    }

    #[tokio::test]
    async fn test_missing_credentials_are_omitted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/members/me/boards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(create_config_without_credentials(&server.uri())).unwrap();
        assert!(!transport.credentials_configured());

        transport
            .execute(RemoteRequest::get(["members", "me", "boards"]))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_remote_rejection_with_json_body_passes_through() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/cards/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "card not found"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .execute(RemoteRequest::put(["cards", "missing"], json!({"closed": true})))
            .await
            .unwrap();
        assert_eq!(result["message"], "card not found");
    }

    #[tokio::test]
    async fn test_unparsable_body_is_remote_format_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boards/bad/lists"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid id"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .execute(RemoteRequest::get(["boards", "bad", "lists"]))
            .await;
        match result {
            Err(TrelloError::RemoteFormat { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "invalid id");
            }
            other => panic!("Expected RemoteFormat error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/members/me/boards"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut config = ClientConfig::new(url::Url::parse(&server.uri()).unwrap());
        config.timeout = Duration::from_millis(50);
        let transport = HttpTransport::new(Arc::new(config)).unwrap();

        let result = transport
            .execute(RemoteRequest::get(["members", "me", "boards"]))
            .await;
        assert!(matches!(result, Err(TrelloError::Timeout)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let transport =
            HttpTransport::new(create_config_without_credentials("http://127.0.0.1:1")).unwrap();

        let err = transport
            .execute(RemoteRequest::get(["members", "me", "boards"]))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_build_url() {
        let transport =
            HttpTransport::new(create_config("https://api.trello.com/1")).unwrap();

        let segments = ["boards", "b1", "lists"].map(String::from);
        let url = transport.build_url(&segments).unwrap();
        assert_eq!(url.as_str(), "https://api.trello.com/1/boards/b1/lists");
    }

    #[test]
    fn test_build_url_escapes_reserved_characters() {
        let transport =
            HttpTransport::new(create_config("https://api.trello.com/1")).unwrap();

        let segments = ["cards", "../../members/me", "a?key=x#frag"].map(String::from);
        let url = transport.build_url(&segments).unwrap();
        assert_eq!(
            url.path(),
            "/1/cards/..%2F..%2Fmembers%2Fme/a%3Fkey=x%23frag"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_rejects_dot_segments() {
        let transport =
            HttpTransport::new(create_config("https://api.trello.com/1")).unwrap();

        for bad in ["", ".", ".."] {
            let segments = vec!["cards".to_string(), bad.to_string()];
            match transport.build_url(&segments) {
                Err(TrelloError::InvalidPathSegment(segment)) => assert_eq!(segment, bad),
                other => panic!("expected InvalidPathSegment for {bad:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_card_id_cannot_escape_api_root() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/1/cards/..%2Fx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&format!("{}/1", server.uri()))).unwrap();

        transport
            .execute(crate::api::cards::archive_request("../x"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_card_id_cannot_inject_query_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&format!("{}/1", server.uri()))).unwrap();
        transport
            .execute(crate::api::cards::archive_request("c1?key=evil"))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/1/cards/c1%3Fkey=evil");
        let keys: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(keys, vec!["test-key".to_string()]);
    }

    #[tokio::test]
    async fn test_dot_segment_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&format!("{}/1", server.uri()))).unwrap();
        let err = transport
            .execute(crate::api::cards::archive_request(".."))
            .await
            .unwrap_err();
        assert!(matches!(err, TrelloError::InvalidPathSegment(_)));
    }
}
