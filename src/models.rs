use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A persisted short code to destination pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    pub short_code: String,
    pub url: String,
}

/// Request body for the shorten endpoint
///
/// Never deserialized directly; handlers build it through `from_value`.
#[derive(utoipa::ToSchema)]
pub struct ShortenRequest {
    pub url: String,
}

impl ShortenRequest {
    /// Pull a usable `url` out of an already parsed body.
    ///
    /// Anything other than an object carrying a non-empty string `url` yields `None`.
    /// Non-string values such as `{"url": 42}` count as missing too, since the
    /// stored destination must become a `Location` header.
    pub fn from_value(body: &JsonValue) -> Option<Self> {
        body.get("url")
            .and_then(JsonValue::as_str)
            .filter(|url| !url.is_empty())
            .map(|url| ShortenRequest {
                url: url.to_string(),
            })
    }
}

/// Response type for successful shorten operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ShortenResponse {
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_string_url() {
        let request = ShortenRequest::from_value(&json!({"url": "https://example.com", "extra": 1}));
        assert_eq!(request.unwrap().url, "https://example.com");
    }

    #[test]
    fn test_from_value_rejects_unusable_bodies() {
        let bodies = [
            json!({}),
            json!({"url": ""}),
            json!({"url": null}),
            json!({"url": 42}),
            json!({"link": "https://example.com"}),
            json!("https://example.com"),
            json!(["https://example.com"]),
            JsonValue::Null,
        ];

        for body in bodies {
            assert!(ShortenRequest::from_value(&body).is_none(), "accepted {}", body);
        }
    }

    #[test]
    fn test_shorten_response_uses_camel_case() {
        let body = serde_json::to_value(ShortenResponse {
            short_url: "https://sho.rt/abc123".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"shortUrl": "https://sho.rt/abc123"}));
    }
}
