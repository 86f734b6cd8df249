//! Message pane contents

use std::time::{Duration, Instant};

const MESSAGE_TTL: Duration = Duration::from_secs(10);
const MAX_MESSAGES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub message_type: MessageType,
    pub text: String,
    pub timestamp: Instant,
}

impl Message {
    pub fn new(message_type: MessageType, text: impl Into<String>) -> Self {
        Self {
            message_type,
            text: text.into(),
            timestamp: Instant::now(),
        }
    }

    /// Errors stay until replaced; everything else fades after a while
    pub fn is_expired(&self) -> bool {
        self.message_type != MessageType::Error && self.timestamp.elapsed() > MESSAGE_TTL
    }

    pub fn icon(&self) -> &str {
        match self.message_type {
            MessageType::Info => "ℹ",
            MessageType::Success => "✓",
            MessageType::Warning => "⚠",
            MessageType::Error => "✗",
        }
    }
}

/// Bounded list of recent messages
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message_type: MessageType, text: impl Into<String>) {
        self.messages.push(Message::new(message_type, text));
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageType::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(MessageType::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(MessageType::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageType::Error, text);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn prune_expired(&mut self) {
        self.messages.retain(|m| !m.is_expired());
    }

    /// The last `n` messages, oldest first
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
