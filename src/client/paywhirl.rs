use super::{SubscriptionApi, SubscriptionSnapshot};
use crate::config::ApiConfig;
use crate::errors::{FetchError, UpdateError};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

const TOKEN_HEADER: &str = "X-Api-Token";

/// HTTP client for the PayWhirl subscriptions endpoint.
///
/// The API token is installed once as a default header when the client is
/// built, so individual requests never handle credentials.
pub struct PayWhirlClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PayWhirlClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(config.base_url.trim())
            .with_context(|| format!("Invalid API base URL '{}'", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid API base URL '{}'", config.base_url);
        }

        let mut token = HeaderValue::from_str(config.token())
            .context("API token contains characters not allowed in an HTTP header")?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("delivery-price/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    /// `{base}/subscriptions/{id}` with the id percent-encoded as one path segment.
    ///
    /// `.` and `..` are rejected since they cannot name a single segment.
    fn subscription_url(&self, id: &str) -> Result<Url, String> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(format!("'{id}' is not a valid subscription id"));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| format!("base URL {} cannot take a path", self.base_url))?
            .pop_if_empty()
            .push("subscriptions")
            .push(id);
        Ok(url)
    }
}

/// Best-effort human-readable reason for a non-success response.
///
/// Prefers the API's own `message` field, falling back to the status line.
async fn failure_detail(resp: reqwest::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    api_message(&body).unwrap_or_else(|| format!("HTTP {status}"))
}

fn api_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// Extract the delivery price from a subscription response.
///
/// The subscription is either the body itself or wrapped in a `data` envelope.
/// The price may be a JSON string or number.
pub(crate) fn parse_snapshot(body: &Value) -> SubscriptionSnapshot {
    let subscription = body
        .get("data")
        .filter(|d| d.is_object())
        .unwrap_or(body);
    let delivery_price = match subscription.get("deliveryPrice") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    SubscriptionSnapshot { delivery_price }
}

#[async_trait]
impl SubscriptionApi for PayWhirlClient {
    async fn fetch_subscription(&self, id: &str) -> Result<SubscriptionSnapshot, FetchError> {
        let fail =
            |detail: String| FetchError(format!("Failed to fetch subscription {id}: {detail}"));
        let url = self.subscription_url(id).map_err(fail)?;
        debug!(%url, "GET subscription");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fail(failure_detail(resp).await));
        }

        let body: Value = resp.json().await.map_err(|e| fail(e.to_string()))?;
        Ok(parse_snapshot(&body))
    }

    async fn update_subscription(
        &self,
        id: &str,
        new_delivery_price: &str,
    ) -> Result<(), UpdateError> {
        let fail =
            |detail: String| UpdateError(format!("Failed to update subscription {id}: {detail}"));
        let url = self.subscription_url(id).map_err(fail)?;
        debug!(%url, new_delivery_price, "PUT subscription");

        let resp = self
            .http
            .put(url)
            .json(&serde_json::json!({ "deliveryPrice": new_delivery_price }))
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fail(failure_detail(resp).await));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_snapshot_bare_object() {
        let snap = parse_snapshot(&json!({ "id": 12, "deliveryPrice": "5.00" }));
        assert_eq!(snap.delivery_price.as_deref(), Some("5.00"));
    }

    #[test]
    fn test_parse_snapshot_data_envelope() {
        let snap = parse_snapshot(&json!({ "data": { "deliveryPrice": "7.50" } }));
        assert_eq!(snap.delivery_price.as_deref(), Some("7.50"));
    }

    #[test]
    fn test_parse_snapshot_numeric_price() {
        let snap = parse_snapshot(&json!({ "deliveryPrice": 4.25 }));
        assert_eq!(snap.delivery_price.as_deref(), Some("4.25"));
    }

    #[test]
    fn test_parse_snapshot_missing_price() {
        let snap = parse_snapshot(&json!({ "data": { "id": 1 } }));
        assert_eq!(snap.delivery_price, None);
        assert_eq!(snap.price_or_placeholder(), "N/A");
    }

    #[test]
    fn test_parse_snapshot_non_object_data_falls_back_to_body() {
        let snap = parse_snapshot(&json!({ "data": "ignored", "deliveryPrice": "1.00" }));
        assert_eq!(snap.delivery_price.as_deref(), Some("1.00"));
    }

    #[test]
    fn test_api_message_extraction() {
        assert_eq!(
            api_message(r#"{"message":"Subscription not found"}"#).as_deref(),
            Some("Subscription not found")
        );
        assert_eq!(api_message(r#"{"message":""}"#), None);
        assert_eq!(api_message("<html>502</html>"), None);
    }

    #[test]
    fn test_new_rejects_token_with_newline() {
        let config = ApiConfig::new(
            "https://example.invalid",
            "bad\ntoken",
            std::time::Duration::from_secs(5),
        );
        assert!(PayWhirlClient::new(&config).is_err());
    }

    #[test]
    fn test_subscription_url_trims_trailing_slash() {
        let config = ApiConfig::new(
            "https://example.invalid/2022-04/",
            "tok",
            std::time::Duration::from_secs(5),
        );
        let client = PayWhirlClient::new(&config).unwrap();
        assert_eq!(
            client.subscription_url("sub_1").unwrap().as_str(),
            "https://example.invalid/2022-04/subscriptions/sub_1"
        );
    }

    fn client() -> PayWhirlClient {
        let config = ApiConfig::new(
            "https://example.invalid/2022-04",
            "tok",
            std::time::Duration::from_secs(5),
        );
        PayWhirlClient::new(&config).unwrap()
    }

    #[test]
    fn test_subscription_url_encodes_id_as_one_segment() {
        let url = client().subscription_url("a/../b?x=1#frag").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.invalid/2022-04/subscriptions/a%2F..%2Fb%3Fx=1%23frag"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_subscription_url_rejects_dot_segments() {
        assert!(client().subscription_url("..").is_err());
        assert!(client().subscription_url(".").is_err());
        assert!(client().subscription_url("").is_err());
    }

    #[test]
    fn test_new_rejects_unparsable_base_url() {
        let config = ApiConfig::new("not a url", "tok", std::time::Duration::from_secs(5));
        assert!(PayWhirlClient::new(&config).is_err());
    }
}
