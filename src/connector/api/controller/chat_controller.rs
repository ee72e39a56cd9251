use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ChatMessage;

use super::super::Container;

/// A prior conversation turn as supplied by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub text: String,
}

impl From<HistoryEntry> for ChatMessage {
    fn from(entry: HistoryEntry) -> Self {
        ChatMessage::new(entry.role.into(), entry.text)
    }
}

pub fn to_history(entries: Vec<HistoryEntry>) -> Vec<ChatMessage> {
    entries.into_iter().map(ChatMessage::from).collect()
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, message: String, history_file: Option<PathBuf>) -> Result<String> {
        if message.trim().is_empty() {
            anyhow::bail!("message must not be empty");
        }

        let history = match history_file {
            Some(path) => {
                let raw = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read history file {}", path.display()))?;
                let entries: Vec<HistoryEntry> =
                    serde_json::from_str(&raw).with_context(|| {
                        format!("history file {} is not a JSON turn list", path.display())
                    })?;
                to_history(entries)
            }
            None => Vec::new(),
        };

        let use_case = self.container.chat_use_case();
        Ok(use_case.send_message(&history, &message).await)
    }
}
