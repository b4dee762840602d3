use anyhow::Context;
use async_trait::async_trait;

use crate::models::ToolState;

const MAX_RESULTS: usize = 5;

#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<String>;
}

/// Google Programmable Search (Custom Search JSON API).
pub struct GoogleSearchProvider {
    api_key: String,
    engine_id: String,
    client: reqwest::Client,
}

impl GoogleSearchProvider {
    pub fn new(api_key: String, engine_id: String) -> Self {
        Self {
            api_key,
            engine_id,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WebSearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str) -> anyhow::Result<String> {
        anyhow::ensure!(
            !self.api_key.is_empty() && !self.engine_id.is_empty(),
            "web search is not configured"
        );

        let num = MAX_RESULTS.to_string();
        let resp = self
            .client
            .get("https://www.googleapis.com/customsearch/v1")
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .context("failed to call Google Search API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Google Search response")?;

        if !status.is_success() {
            anyhow::bail!("Google Search API error ({}): {}", status, data);
        }

        Ok(format_results(&data))
    }
}

fn format_results(data: &serde_json::Value) -> String {
    data["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let title = item["title"].as_str()?;
                    let snippet = item["snippet"].as_str().unwrap_or("").replace('\n', " ");
                    let link = item["link"].as_str().unwrap_or("");
                    Some(format!("{title}: {snippet} ({link})"))
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

/// Fallback general-information search. Never fails: provider errors come
/// back as an apology the agent can speak.
pub async fn search_web(
    provider: &dyn WebSearchProvider,
    query: &str,
    state: Option<&mut ToolState>,
) -> String {
    match provider.search(query).await {
        Ok(result) if result.trim().is_empty() => {
            format!("Hmm, I couldn't find information about '{query}'. Could you ask something else?")
        }
        Ok(result) => {
            if let Some(state) = state {
                state.record_web_search(query);
            }
            result
        }
        Err(e) => {
            tracing::error!(error = %e, query, "web search failed");
            "Hmm, I encountered an issue searching the web. Could you try a different question?"
                .to_string()
        }
    }
}
