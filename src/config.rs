use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub knowledge_base_path: String,
    pub dialogflow_project_id: String,
    pub dialogflow_location: String,
    pub dialogflow_agent_id: String,
    pub dialogflow_language: String,
    pub dialogflow_access_token: String,
    pub google_search_api_key: String,
    pub google_search_engine_id: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            knowledge_base_path: env::var("KNOWLEDGE_BASE_PATH").unwrap_or_else(|_| {
                "knowledge/hair_salon_treatment_knowledge_base.txt".to_string()
            }),
            dialogflow_project_id: env::var("DIALOGFLOW_PROJECT_ID").unwrap_or_default(),
            dialogflow_location: env::var("DIALOGFLOW_LOCATION")
                .unwrap_or_else(|_| "global".to_string()),
            dialogflow_agent_id: env::var("DIALOGFLOW_AGENT_ID").unwrap_or_default(),
            dialogflow_language: env::var("DIALOGFLOW_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
            dialogflow_access_token: env::var("DIALOGFLOW_ACCESS_TOKEN").unwrap_or_default(),
            google_search_api_key: env::var("GOOGLE_SEARCH_API_KEY").unwrap_or_default(),
            google_search_engine_id: env::var("GOOGLE_SEARCH_ENGINE_ID").unwrap_or_default(),
        }
    }

    pub fn dialogflow_configured(&self) -> bool {
        !self.dialogflow_project_id.is_empty() && !self.dialogflow_agent_id.is_empty()
    }

    pub fn web_search_configured(&self) -> bool {
        !self.google_search_api_key.is_empty() && !self.google_search_engine_id.is_empty()
    }
}
