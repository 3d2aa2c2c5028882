//! Chat session
//!
//! Appends the user's message, waits a fixed delay, then appends the canned
//! reply. Dropping the `ask` future before the delay elapses cancels the
//! pending reply.

use std::time::Duration;
use tracing::{debug, info};

use crate::advisor::classifier::QueryClassifier;
use crate::advisor::responder::respond;
use crate::config::DEFAULT_CHAT_DELAY_MS;
use crate::models::ChatMessage;
use crate::state::ProfileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickQuestion {
    pub category: &'static str,
    pub question: &'static str,
}

/// Starter prompts offered on an empty conversation.
pub fn quick_questions() -> &'static [QuickQuestion] {
    const QUESTIONS: &[QuickQuestion] = &[
        QuickQuestion {
            category: "Savings",
            question: "How much should I save each month?",
        },
        QuickQuestion {
            category: "Investment",
            question: "What's the best investment strategy for my age?",
        },
        QuickQuestion {
            category: "Insurance",
            question: "How much life insurance do I need?",
        },
        QuickQuestion {
            category: "Tax Planning",
            question: "How can I reduce my tax liability?",
        },
    ];
    QUESTIONS
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    reply_delay: Duration,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_CHAT_DELAY_MS))
    }
}

impl ChatSession {
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Sends `text` to the advisor. Blank input is ignored and yields `None`;
    /// otherwise the appended AI message is returned.
    pub async fn ask(&self, store: &mut ProfileStore, text: &str) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            debug!("Ignoring blank chat message");
            return None;
        }

        store.append_chat_message(ChatMessage::user(text)).await;

        tokio::time::sleep(self.reply_delay).await;

        let category = QueryClassifier::classify(text);
        let reply = ChatMessage::ai(respond(store.current().profile.as_ref(), text));
        store.append_chat_message(reply.clone()).await;

        info!(
            category = ?category,
            history_len = store.current().chat_history.len(),
            "Advisor replied"
        );

        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::models::{Profile, Sender};
    use crate::state::InMemorySnapshotStore;
    use std::sync::Arc;

    async fn store() -> ProfileStore {
        ProfileStore::load(Arc::new(InMemorySnapshotStore::new()), DEFAULT_STORAGE_KEY).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_after_delay() {
        let mut store = store().await;
        store
            .save_profile(Profile {
                income: 50_000.0,
                expenses: 30_000.0,
                ..Profile::default()
            })
            .await
            .unwrap();

        let session = ChatSession::default();
        let started = tokio::time::Instant::now();
        let reply = session.ask(&mut store, "How much should I save?").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(reply.sender, Sender::Ai);
        assert!(reply.text.contains("₹10,000 per month"));

        let history = &store.current().chat_history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(history[1], reply);
    }

    #[tokio::test]
    async fn test_blank_message_ignored() {
        let mut store = store().await;
        let session = ChatSession::new(Duration::ZERO);
        assert!(session.ask(&mut store, "   ").await.is_none());
        assert!(store.current().chat_history.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_ask_cancels_reply() {
        let mut store = store().await;
        let session = ChatSession::new(Duration::from_secs(5));

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            session.ask(&mut store, "tell me about tax"),
        )
        .await;

        assert!(outcome.is_err());
        let history = &store.current().chat_history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender, Sender::User);
    }

    #[test]
    fn test_quick_questions() {
        assert_eq!(quick_questions().len(), 4);
        assert_eq!(quick_questions()[3].category, "Tax Planning");
    }
}
