//! Outbound client for the news provider.

use anyhow::Context;
use libris_http::AppError;
use libris_kernel::settings::NewsSettings;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use super::models::{NewsQuery, NewsResponse, ProviderResponse};

const HEADLINES_PATH: &str = "top-headlines";
const API_KEY_HEADER: &str = "X-Api-Key";
const USER_AGENT: &str = concat!("libris/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news provider responded with status {status}")]
    Status { status: StatusCode },

    #[error("news provider reported an error: {message}")]
    Provider { message: String },

    #[error("request to news provider failed")]
    Transport(#[from] reqwest::Error),

    #[error("news provider response could not be decoded")]
    Decode(#[source] reqwest::Error),
}

impl From<NewsError> for AppError {
    fn from(err: NewsError) -> Self {
        AppError::upstream(err)
    }
}

/// Query string sent upstream; unset filters are left out entirely.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct ProviderQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
}

impl<'a> ProviderQuery<'a> {
    fn from_filters(filters: &'a NewsQuery) -> Self {
        // `?query=` arrives as an empty string; treat it like an omitted filter.
        let supplied = |value: &'a Option<String>| value.as_deref().filter(|v| !v.is_empty());
        Self {
            q: supplied(&filters.query),
            category: supplied(&filters.category),
            country: supplied(&filters.country),
        }
    }
}

/// Forwards headline searches to the provider and reshapes the answer.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct NewsGateway {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for NewsGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsGateway")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl NewsGateway {
    /// Build the gateway from settings.
    ///
    /// A missing credential is a configuration error, reported here at startup
    /// rather than on each request.
    pub fn new(settings: &NewsSettings) -> anyhow::Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .context(
                "news provider credential is not configured; \
                 set NEWS_API_KEY or LIBRIS__NEWS__API_KEY",
            )?
            .to_string();

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build news provider HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", settings.base_url.trim_end_matches('/'), HEADLINES_PATH),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one upstream search. No retries; any failure fails the whole call.
    pub async fn search(&self, filters: &NewsQuery) -> Result<NewsResponse, NewsError> {
        let query = ProviderQuery::from_filters(filters);
        tracing::debug!(?query, "forwarding news search");

        let response = self
            .client
            .get(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "news provider returned non-success status");
            return Err(NewsError::Status { status });
        }

        let body: ProviderResponse = response.json().await.map_err(NewsError::Decode)?;
        if body.status.as_deref() == Some("error") {
            return Err(NewsError::Provider {
                message: body.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let shaped = NewsResponse::from(body);
        tracing::debug!(
            total_results = shaped.total_results,
            articles = shaped.articles.len(),
            "news search complete"
        );
        Ok(shaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> NewsSettings {
        NewsSettings {
            base_url: base_url.to_string(),
            api_key: Some("test-key".to_string()),
        }
    }

    fn headlines() -> serde_json::Value {
        json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "The Verge"},
                    "author": "A. Writer",
                    "title": "First",
                    "description": "One",
                    "url": "https://example.com/1",
                    "urlToImage": null,
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "content": "..."
                },
                {
                    "source": {"id": "wired", "name": "Wired"},
                    "title": "Second",
                    "description": null,
                    "url": "https://example.com/2",
                    "publishedAt": "2024-05-02T08:30:00Z"
                }
            ]
        })
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let mut settings = settings("http://localhost");
        settings.api_key = None;
        assert!(NewsGateway::new(&settings).is_err());

        settings.api_key = Some("   ".to_string());
        let err = NewsGateway::new(&settings).unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let gateway = NewsGateway::new(&settings("https://newsapi.org/v2/")).unwrap();
        assert_eq!(gateway.endpoint(), "https://newsapi.org/v2/top-headlines");
    }

    #[test]
    fn debug_output_hides_the_credential() {
        let gateway = NewsGateway::new(&settings("http://localhost")).unwrap();
        assert!(!format!("{gateway:?}").contains("test-key"));
    }

    #[test]
    fn empty_filters_are_not_forwarded() {
        let filters = NewsQuery {
            query: Some(String::new()),
            category: None,
            country: Some("us".to_string()),
        };

        let query = ProviderQuery::from_filters(&filters);
        assert_eq!(
            query,
            ProviderQuery {
                q: None,
                category: None,
                country: Some("us"),
            }
        );
    }

    #[tokio::test]
    async fn forwards_all_filters_and_credential() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("q", "rust"))
            .and(query_param("category", "technology"))
            .and(query_param("country", "us"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(headlines()))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = NewsGateway::new(&settings(&server.uri())).unwrap();
        let filters = NewsQuery {
            query: Some("rust".into()),
            category: Some("technology".into()),
            country: Some("us".into()),
        };

        let response = gateway.search(&filters).await.unwrap();
        assert_eq!(response.total_results, 2);
        assert_eq!(response.articles.len(), 2);
        assert_eq!(response.articles[0].source.as_deref(), Some("The Verge"));
        assert_eq!(response.articles[1].description, None);
    }

    #[tokio::test]
    async fn no_filters_sends_no_filter_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .respond_with(ResponseTemplate::new(200).set_body_json(headlines()))
            .mount(&server)
            .await;

        let gateway = NewsGateway::new(&settings(&server.uri())).unwrap();
        gateway.search(&NewsQuery::default()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query_pairs().next().is_none());
        assert!(!requests[0].url.as_str().contains("test-key"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid"
            })))
            .mount(&server)
            .await;

        let gateway = NewsGateway::new(&settings(&server.uri())).unwrap();
        let err = gateway.search(&NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, NewsError::Status { status } if status == StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn provider_error_status_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "rate limited"
            })))
            .mount(&server)
            .await;

        let gateway = NewsGateway::new(&settings(&server.uri())).unwrap();
        let err = gateway.search(&NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, NewsError::Provider { ref message } if message == "rate limited"));
    }

    #[tokio::test]
    async fn garbage_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let gateway = NewsGateway::new(&settings(&server.uri())).unwrap();
        let err = gateway.search(&NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, NewsError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        // Nothing listens on the discard port.
        let gateway = NewsGateway::new(&settings("http://127.0.0.1:9")).unwrap();
        let err = gateway.search(&NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, NewsError::Transport(_)));
    }
}
