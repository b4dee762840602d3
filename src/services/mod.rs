pub mod booking;
pub mod dialogflow;
pub mod knowledge;
pub mod web_search;
