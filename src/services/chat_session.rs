use async_trait::async_trait;
use tracing::warn;

use crate::models::{ChatReply, TranscriptEntry};

pub const ASSISTANT_NAME: &str = "Valyn AI";
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Whatever answers chat messages for a session
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, String>;
}

/// Talks to a running proxy over `POST /api/chat`
pub struct ProxyChatBackend {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ProxyChatBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for ProxyChatBackend {
    async fn send(&self, message: &str) -> Result<String, String> {
        let response = self.http_client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{}: {}", status, body));
        }

        response
            .json::<ChatReply>()
            .await
            .map(|body| body.reply)
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

/// The chat window: a transcript plus the backend it talks to
pub struct ChatSession<B: ChatBackend> {
    backend: B,
    transcript: Vec<TranscriptEntry>,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Send one message. Blank input is ignored and nothing is sent.
    ///
    /// Returns the assistant line that was appended, if any.
    pub async fn submit(&mut self, input: &str) -> Option<&TranscriptEntry> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript.push(TranscriptEntry::user(message));

        let reply = match self.backend.send(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.push(TranscriptEntry::assistant(reply));
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ChatBackend for CountingBackend {
        async fn send(&self, message: &str) -> Result<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("connection refused".to_string())
            } else {
                Ok(format!("you said {}", message))
            }
        }
    }

    #[tokio::test]
    async fn test_empty_message_sends_nothing() {
        let mut session = ChatSession::new(CountingBackend::default());
        assert!(session.submit("").await.is_none());
        assert!(session.submit("   \t").await.is_none());
        assert!(session.transcript().is_empty());
        assert_eq!(session.backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_appended_after_user_line() {
        let mut session = ChatSession::new(CountingBackend::default());
        let reply = session.submit("  hello  ").await.cloned().unwrap();
        assert_eq!(reply.content, "you said hello");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], TranscriptEntry::user("hello"));
        assert_eq!(transcript[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_backend_failure_shows_fallback() {
        let mut session = ChatSession::new(CountingBackend { fail: true, ..Default::default() });
        let reply = session.submit("hello").await.cloned().unwrap();
        assert_eq!(reply.content, FALLBACK_REPLY);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_proxy_endpoint() {
        let backend = ProxyChatBackend::new("http://localhost:3000/");
        assert_eq!(backend.endpoint(), "http://localhost:3000/api/chat");
    }
}
