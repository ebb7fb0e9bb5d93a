use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Optional filters accepted by `GET /news`, forwarded verbatim.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsQuery {
    /// Free-text search terms
    #[param(example = "rust")]
    pub query: Option<String>,
    /// Provider category, e.g. `technology`
    #[param(example = "technology")]
    pub category: Option<String>,
    /// Two-letter country code
    #[param(example = "us")]
    pub country: Option<String>,
}

/// A headline reshaped from the provider payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Provider display name
    pub source: Option<String>,
    pub url: Option<String>,
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub total_results: u64,
    pub articles: Vec<NewsArticle>,
}

/// Provider wire format; only the fields we keep are decoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<ProviderArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderArticle {
    pub source: Option<ProviderSource>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderSource {
    pub name: Option<String>,
}

impl From<ProviderArticle> for NewsArticle {
    fn from(article: ProviderArticle) -> Self {
        Self {
            title: article.title,
            description: article.description,
            source: article.source.and_then(|source| source.name),
            url: article.url,
            published_at: article.published_at,
        }
    }
}

impl From<ProviderResponse> for NewsResponse {
    fn from(response: ProviderResponse) -> Self {
        Self {
            total_results: response.total_results,
            articles: response.articles.into_iter().map(NewsArticle::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_articles_are_reshaped() {
        let provider: ProviderResponse = serde_json::from_value(json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": "bbc-news", "name": "BBC News"},
                "author": "Someone",
                "title": "Headline",
                "description": "Summary",
                "url": "https://example.com/a",
                "urlToImage": "https://example.com/a.jpg",
                "publishedAt": "2024-05-01T12:00:00Z",
                "content": "Full text"
            }]
        }))
        .unwrap();

        let response = serde_json::to_value(NewsResponse::from(provider)).unwrap();
        assert_eq!(
            response,
            json!({
                "totalResults": 1,
                "articles": [{
                    "title": "Headline",
                    "description": "Summary",
                    "source": "BBC News",
                    "url": "https://example.com/a",
                    "publishedAt": "2024-05-01T12:00:00Z"
                }]
            })
        );
    }

    #[test]
    fn missing_source_and_description_stay_null() {
        let provider: ProviderResponse = serde_json::from_value(json!({
            "status": "ok",
            "totalResults": 3,
            "articles": [{"title": "Only a title", "description": null}]
        }))
        .unwrap();

        let article = serde_json::to_value(&NewsResponse::from(provider).articles[0]).unwrap();
        assert_eq!(article.as_object().unwrap().len(), 5);
        assert_eq!(article["source"], serde_json::Value::Null);
        assert_eq!(article["description"], serde_json::Value::Null);
    }
}
