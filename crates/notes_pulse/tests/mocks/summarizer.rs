use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use notes_pulse::Summarizer;

/// Replies with queued responses first, then keeps returning `default_reply`.
#[derive(Clone)]
pub struct MockSummarizer {
    pub default_reply: String,
    pub replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(default_reply: &str) -> Self {
        Self {
            default_reply: default_reply.to_string(),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    pub fn then_reply(self, reply: Result<&str, &str>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_string).map_err(str::to_string));
        self
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    fn model_name(&self) -> &str {
        "mock-gemini"
    }

    async fn complete(&self, instructions: &str, content: &str) -> Result<String, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((instructions.to_string(), content.to_string()));

        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(msg)) => Err(anyhow::anyhow!("{}", msg)),
            None => Ok(self.default_reply.clone()),
        }
    }
}
