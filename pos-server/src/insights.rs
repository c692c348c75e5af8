//! AI insights service
//!
//! Pass-through to an external analytics completion API: the current
//! catalog and sales history are serialized into a prompt alongside the
//! user's question, and the answer text is returned verbatim. No core
//! logic depends on the output; when the service is unconfigured or
//! unreachable the caller gets a degraded-mode message instead of an
//! error.

use serde::Deserialize;
use serde_json::json;
use shared::models::{Product, Sale};

/// Shown when no API key is configured
const DISABLED_MESSAGE: &str =
    "AI functionality is disabled because the API key is not configured.";

/// Shown when the upstream call fails
const FALLBACK_MESSAGE: &str =
    "Sorry, I encountered an error while analyzing the data. Please check the configuration and try again.";

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

/// Client for the external analytics API
#[derive(Debug, Clone)]
pub struct InsightsService {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl InsightsService {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Answer a free-text question about the given products and sales.
    ///
    /// Never fails: unconfigured or failing upstreams produce fixed
    /// fallback text.
    pub async fn ask(&self, question: &str, products: &[Product], sales: &[Sale]) -> String {
        let Some(api_key) = &self.api_key else {
            return DISABLED_MESSAGE.to_string();
        };

        let system = format!(
            "You are a helpful business analyst for a cafe. \
             Analyze the provided JSON data to answer the user's question. \
             Provide a concise, helpful, and friendly answer. \
             Do not output JSON unless specifically asked. \
             Today's date is {}.",
            chrono::Local::now().format("%Y-%m-%d")
        );
        let prompt = format!(
            "User Question: \"{}\"\n\n\
             Here is the available data:\n\n\
             Products List (inventory):\n{}\n\n\
             Sales History:\n{}\n\n\
             Please answer the user's question based on this data.",
            question,
            serde_json::to_string_pretty(products).unwrap_or_default(),
            serde_json::to_string_pretty(sales).unwrap_or_default(),
        );

        let result = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&json!({
                "system": system,
                "prompt": prompt,
                "temperature": 0.5,
            }))
            .send()
            .await;

        match result {
            Ok(response) => match response.error_for_status() {
                Ok(response) => match response.json::<CompletionResponse>().await {
                    Ok(completion) => completion.text,
                    Err(e) => {
                        tracing::error!(error = %e, "Insights response parse failed");
                        FALLBACK_MESSAGE.to_string()
                    }
                },
                Err(e) => {
                    tracing::error!(error = %e, "Insights API returned error status");
                    FALLBACK_MESSAGE.to_string()
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Insights API unreachable");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_returns_disabled_message() {
        let service = InsightsService::new("http://localhost:9".to_string(), None);
        let answer = service.ask("What sells best?", &[], &[]).await;
        assert_eq!(answer, DISABLED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unreachable_api_returns_fallback() {
        // Port 9 (discard) is not listening; the request must fail fast
        // and degrade instead of erroring.
        let service = InsightsService::new(
            "http://127.0.0.1:9/v1/complete".to_string(),
            Some("test-key".to_string()),
        );
        let answer = service.ask("What sells best?", &[], &[]).await;
        assert_eq!(answer, FALLBACK_MESSAGE);
    }
}
