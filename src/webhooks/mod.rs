pub mod dialogflow;
pub mod reply;
