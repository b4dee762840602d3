use crate::config::AppConfig;
use crate::services::booking::BookingService;
use crate::services::dialogflow::IntentDetector;
use crate::services::knowledge::KnowledgeBase;
use crate::services::web_search::WebSearchProvider;

pub struct AppState {
    pub config: AppConfig,
    pub knowledge: KnowledgeBase,
    pub booking: BookingService,
    pub web_search: Box<dyn WebSearchProvider>,
    pub dialogflow: Box<dyn IntentDetector>,
}
