pub mod client;
pub mod openai;
pub mod retry;
pub mod summarizer;
