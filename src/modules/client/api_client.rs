use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::features::cities::dtos::CityResponseDto;
use crate::features::states::dtos::StateResponseDto;
use crate::modules::client::session::{TokenSource, TokenStore};

/// Failure modes of the client pipeline
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API token not provided")]
    TokenNotProvided,

    /// The server answered with a failure status; `message` carries the
    /// server-supplied `message`/`error` field or an "HTTP <status>"
    /// fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decoded response body.
///
/// 204 yields `Empty`; JSON content types are parsed with a null fallback;
/// anything else is read as text with an empty-string fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Text(String),
}

impl Payload {
    /// Server-supplied error text, if the body carries one
    fn error_message(&self) -> Option<String> {
        match self {
            Payload::Json(value) => value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(String::from),
            _ => None,
        }
    }

    fn into_json(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Empty => Value::Null,
            Payload::Text(text) => Value::String(text),
        }
    }
}

/// One API session: base URL, HTTP client, token store and token source.
///
/// This replaces the original front end's module-level globals; everything
/// a request needs travels through this object.
pub struct ApiSession {
    base_url: String,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    source: Arc<dyn TokenSource>,
}

impl ApiSession {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
        source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            store,
            source,
        }
    }

    /// Acquire a fresh token from the source and persist it
    async fn refresh_token(&self) -> Result<String, ClientError> {
        let token = self
            .source
            .acquire()
            .await
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::TokenNotProvided)?;
        self.store.save(&token);
        Ok(token)
    }

    /// Issue one request through the pipeline.
    ///
    /// Attaches the stored bearer token, serializes the JSON body, decodes
    /// the response per content type, and on a 401 acquires a new token and
    /// re-issues the same request exactly once. A second 401 fails; there
    /// is never a third attempt.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Payload, ClientError> {
        self.request_inner(method, path, body, false).await
    }

    fn request_inner<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
        retried: bool,
    ) -> Pin<Box<dyn Future<Output = Result<Payload, ClientError>> + Send + 'a>> {
        Box::pin(async move {
            let token = self.store.load().unwrap_or_default();

            let mut request = self
                .http
                .request(method.clone(), format!("{}{}", self.base_url, path))
                .bearer_auth(&token);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::NO_CONTENT {
                return Ok(Payload::Empty);
            }

            let is_json = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.contains("application/json"));

            let payload = if is_json {
                Payload::Json(response.json::<Value>().await.unwrap_or(Value::Null))
            } else {
                Payload::Text(response.text().await.unwrap_or_default())
            };

            if !status.is_success() {
                if status == StatusCode::UNAUTHORIZED && !retried {
                    self.refresh_token().await?;
                    return self.request_inner(method, path, body, true).await;
                }
                let message = payload
                    .error_message()
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            Ok(payload)
        })
    }
}

/// Typed wrappers over the seven catalog endpoints
pub struct ApiClient {
    session: ApiSession,
}

impl ApiClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    fn decode<T: DeserializeOwned>(payload: Payload) -> Result<T, ClientError> {
        Ok(serde_json::from_value(payload.into_json())?)
    }

    pub async fn list_states(&self) -> Result<Vec<StateResponseDto>, ClientError> {
        let payload = self.session.request(Method::GET, "/estados", None).await?;
        Self::decode(payload)
    }

    pub async fn get_state(&self, uf: &str) -> Result<StateResponseDto, ClientError> {
        let payload = self
            .session
            .request(Method::GET, &format!("/estados/{}", uf), None)
            .await?;
        Self::decode(payload)
    }

    pub async fn list_cities(&self, limit: Option<i64>) -> Result<Vec<CityResponseDto>, ClientError> {
        let path = match limit {
            Some(limit) => format!("/cidades?limit={}", limit),
            None => "/cidades".to_string(),
        };
        let payload = self.session.request(Method::GET, &path, None).await?;
        Self::decode(payload)
    }

    pub async fn get_city(&self, id: i32) -> Result<CityResponseDto, ClientError> {
        let payload = self
            .session
            .request(Method::GET, &format!("/cidades/{}", id), None)
            .await?;
        Self::decode(payload)
    }

    pub async fn create_city(
        &self,
        name: &str,
        state_uf: &str,
    ) -> Result<CityResponseDto, ClientError> {
        let body = serde_json::json!({ "name": name, "state_uf": state_uf });
        let payload = self
            .session
            .request(Method::POST, "/cidades", Some(&body))
            .await?;
        Self::decode(payload)
    }

    pub async fn update_city(
        &self,
        id: i32,
        name: &str,
        state_uf: &str,
    ) -> Result<CityResponseDto, ClientError> {
        let body = serde_json::json!({ "name": name, "state_uf": state_uf });
        let payload = self
            .session
            .request(Method::PUT, &format!("/cidades/{}", id), Some(&body))
            .await?;
        Self::decode(payload)
    }

    pub async fn delete_city(&self, id: i32) -> Result<(), ClientError> {
        self.session
            .request(Method::DELETE, &format!("/cidades/{}", id), None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::client::session::MemoryTokenStore;
    use async_trait::async_trait;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use fake::faker::address::en::CityName;
    use fake::Fake;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::assert_ok;

    /// Token source handing out a fixed replacement token, counting calls
    struct FixedTokenSource {
        token: Option<String>,
        prompts: AtomicUsize,
    }

    impl FixedTokenSource {
        fn new(token: Option<&str>) -> Self {
            Self {
                token: token.map(String::from),
                prompts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TokenSource for FixedTokenSource {
        async fn acquire(&self) -> Option<String> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.token.clone()
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn bearer_of(headers: &HeaderMap) -> String {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default()
            .to_string()
    }

    /// Stub that rejects every token except "fresh", counting attempts
    fn stub_requiring_fresh_token(attempts: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/estados",
            get(
                move |State(attempts): State<Arc<AtomicUsize>>, headers: HeaderMap| async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    if bearer_of(&headers) == "fresh" {
                        (
                            StatusCode::OK,
                            Json(json!([{"id": 1, "name": "São Paulo", "uf": "SP"}])),
                        )
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid token"})))
                    }
                },
            )
            .with_state(attempts),
        )
    }

    #[tokio::test]
    async fn test_single_401_triggers_exactly_one_retry() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let base_url = spawn(stub_requiring_fresh_token(Arc::clone(&attempts))).await;

        let store = Arc::new(MemoryTokenStore::new(Some("stale")));
        let source = Arc::new(FixedTokenSource::new(Some("fresh")));
        let client = ApiClient::new(ApiSession::new(
            base_url,
            Arc::clone(&store) as Arc<dyn TokenStore>,
            Arc::clone(&source) as Arc<dyn TokenSource>,
        ));

        let states = assert_ok!(client.list_states().await);
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].uf, "SP");
        // One failed attempt, one prompt, one retry; new token persisted
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(source.prompts.load(Ordering::SeqCst), 1);
        assert_eq!(store.load(), Some("fresh".to_string()));
    }

    #[tokio::test]
    async fn test_second_401_fails_without_third_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let base_url = spawn(stub_requiring_fresh_token(Arc::clone(&attempts))).await;

        // Source keeps handing out a token the server rejects
        let store = Arc::new(MemoryTokenStore::new(Some("stale")));
        let source = Arc::new(FixedTokenSource::new(Some("still-stale")));
        let client = ApiClient::new(ApiSession::new(
            base_url,
            store as Arc<dyn TokenStore>,
            Arc::clone(&source) as Arc<dyn TokenSource>,
        ));

        let err = client.list_states().await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid token");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(source.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_aborts_when_no_token_is_provided() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let base_url = spawn(stub_requiring_fresh_token(Arc::clone(&attempts))).await;

        let store = Arc::new(MemoryTokenStore::default());
        let source = Arc::new(FixedTokenSource::new(None));
        let client = ApiClient::new(ApiSession::new(
            base_url,
            store as Arc<dyn TokenStore>,
            source as Arc<dyn TokenSource>,
        ));

        let err = client.list_states().await.unwrap_err();
        assert!(matches!(err, ClientError::TokenNotProvided));
        // The failed attempt happened, but no retry without a token
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_204_yields_empty_payload() {
        let router = Router::new().route(
            "/cidades/{id}",
            delete(|| async { StatusCode::NO_CONTENT }),
        );
        let base_url = spawn(router).await;

        let client = ApiClient::new(ApiSession::new(
            base_url,
            Arc::new(MemoryTokenStore::new(Some("tok"))) as Arc<dyn TokenStore>,
            Arc::new(FixedTokenSource::new(None)) as Arc<dyn TokenSource>,
        ));

        assert_ok!(client.delete_city(7).await);
    }

    #[tokio::test]
    async fn test_create_city_round_trips_entity() {
        let router = Router::new().route(
            "/cidades",
            axum::routing::post(|Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "id": 1,
                        "name": body["name"],
                        "state_uf": body["state_uf"],
                    })),
                )
            }),
        );
        let base_url = spawn(router).await;

        let client = ApiClient::new(ApiSession::new(
            base_url,
            Arc::new(MemoryTokenStore::new(Some("tok"))) as Arc<dyn TokenStore>,
            Arc::new(FixedTokenSource::new(None)) as Arc<dyn TokenSource>,
        ));

        let name: String = CityName().fake();
        let city = assert_ok!(client.create_city(&name, "SP").await);
        assert_eq!(city.id, 1);
        assert_eq!(city.name, name);
        assert_eq!(city.state_uf, "SP");
    }

    #[tokio::test]
    async fn test_non_json_error_falls_back_to_http_status_text() {
        let router = Router::new().route(
            "/estados",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = spawn(router).await;

        let client = ApiClient::new(ApiSession::new(
            base_url,
            Arc::new(MemoryTokenStore::new(Some("tok"))) as Arc<dyn TokenStore>,
            Arc::new(FixedTokenSource::new(None)) as Arc<dyn TokenSource>,
        ));

        let err = client.list_states().await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "HTTP 500");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_decodes_as_text() {
        let router = Router::new().route("/whatever", get(|| async { "hello" }));
        let base_url = spawn(router).await;

        let session = ApiSession::new(
            base_url,
            Arc::new(MemoryTokenStore::new(Some("tok"))) as Arc<dyn TokenStore>,
            Arc::new(FixedTokenSource::new(None)) as Arc<dyn TokenSource>,
        );

        let payload = assert_ok!(session.request(Method::GET, "/whatever", None).await);
        assert_eq!(payload, Payload::Text("hello".to_string()));
    }

    #[test]
    fn test_error_message_prefers_message_over_error_field() {
        let both = Payload::Json(json!({"message": "m", "error": "e"}));
        assert_eq!(both.error_message(), Some("m".to_string()));

        let error_only = Payload::Json(json!({"error": "e"}));
        assert_eq!(error_only.error_message(), Some("e".to_string()));

        assert_eq!(Payload::Text("nope".to_string()).error_message(), None);
        assert_eq!(Payload::Empty.error_message(), None);
    }
}
