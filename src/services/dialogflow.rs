use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A Dialogflow CX conversation session, owned by the caller and reused
/// across turns so the CX agent keeps its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CxSession {
    pub id: String,
}

impl CxSession {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn resume(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Default for CxSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait IntentDetector: Send + Sync {
    /// Text replies the agent produced for `text`, in order.
    async fn detect_intent(&self, text: &str, session: &CxSession) -> anyhow::Result<Vec<String>>;
}

pub struct DialogflowCxClient {
    project_id: String,
    location: String,
    agent_id: String,
    language_code: String,
    access_token: String,
    client: reqwest::Client,
}

impl DialogflowCxClient {
    pub fn new(
        project_id: String,
        location: String,
        agent_id: String,
        language_code: String,
        access_token: String,
    ) -> Self {
        Self {
            project_id,
            location,
            agent_id,
            language_code,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub fn session_path(&self, session: &CxSession) -> String {
        format!(
            "projects/{}/locations/{}/agents/{}/sessions/{}",
            self.project_id, self.location, self.agent_id, session.id
        )
    }

    fn endpoint(&self, session: &CxSession) -> String {
        format!(
            "https://{}-dialogflow.googleapis.com/v3/{}:detectIntent",
            self.location,
            self.session_path(session)
        )
    }
}

#[async_trait]
impl IntentDetector for DialogflowCxClient {
    async fn detect_intent(&self, text: &str, session: &CxSession) -> anyhow::Result<Vec<String>> {
        let body = json!({
            "queryInput": {
                "text": { "text": text },
                "languageCode": self.language_code,
            }
        });

        let resp = self
            .client
            .post(self.endpoint(session))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .context("failed to call Dialogflow CX API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Dialogflow CX response")?;

        if !status.is_success() {
            anyhow::bail!("Dialogflow CX API error ({}): {}", status, data);
        }

        Ok(response_texts(&data))
    }
}

fn response_texts(data: &serde_json::Value) -> Vec<String> {
    data["queryResult"]["responseMessages"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|msg| msg["text"]["text"].as_array())
        .flatten()
        .filter_map(|t| t.as_str().map(str::to_string))
        .collect()
}

pub async fn query_dialogflow_cx(
    detector: &dyn IntentDetector,
    user_message: &str,
    session: &CxSession,
) -> String {
    match detector.detect_intent(user_message, session).await {
        Ok(replies) if replies.is_empty() => "Sorry, I didn’t understand.".to_string(),
        Ok(replies) => replies.join(" "),
        Err(e) => {
            tracing::error!(error = %e, session = %session.id, "Dialogflow CX error");
            "There was a system error. Please try again.".to_string()
        }
    }
}
