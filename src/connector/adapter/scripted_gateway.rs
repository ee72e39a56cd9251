use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ModelGateway;
use crate::domain::{DomainError, GenerationRequest};

const SCRIPTED_MODEL: &str = "scripted";

/// Offline reply used when nothing else is queued.
pub const DEFAULT_SCRIPTED_REPLY: &str =
    "Это демонстрационный ответ без обращения к внешнему сервису.";

#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    Transport(String),
    Empty,
}

/// A [`ModelGateway`] that answers from a script and records every request.
///
/// Outcomes are consumed in order; once the queue is empty every call gets
/// the default reply. Used by tests and by the `--offline` CLI mode.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Outcome>>,
    default_reply: String,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply: DEFAULT_SCRIPTED_REPLY.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_reply(mut self, text: impl Into<String>) -> Self {
        self.default_reply = text.into();
        self
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Outcome::Reply(text.into()));
        self
    }

    pub fn with_transport_error(self, msg: impl Into<String>) -> Self {
        self.push(Outcome::Transport(msg.into()));
        self
    }

    pub fn with_empty_response(self) -> Self {
        self.push(Outcome::Empty);
        self
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }

    fn push(&self, outcome: Outcome) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
    }
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn complete(&self, request: GenerationRequest) -> Result<String, DomainError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match next {
            Some(Outcome::Reply(text)) => Ok(text),
            Some(Outcome::Transport(msg)) => Err(DomainError::transport(msg)),
            Some(Outcome::Empty) => Err(DomainError::empty_response("scripted empty response")),
            None => Ok(self.default_reply.clone()),
        }
    }

    fn model(&self) -> &str {
        SCRIPTED_MODEL
    }
}
