//! Conversation log and turn-taking state for the assistant chat.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app holds one [`Conversation`] per signed-in session; signing out
//! resets it to the greeting. A turn starts with [`Conversation::begin_turn`],
//! which appends the user's message immediately, and ends with
//! [`Conversation::finish_turn`] once the backend exchange settles. The
//! network call between the two lives in `Session::send_message`, which
//! reaches the log through a [`ConversationCell`].
//!
//! INVARIANTS
//! ==========
//! - The log is append-only; ids strictly increase in send order.
//! - At most one exchange is outstanding: `begin_turn` refuses while awaiting.
//! - A failed exchange appends nothing; it raises a [`Notice`] instead.
//! - A reply for a turn started before the last reset is dropped.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

use leptos::prelude::{RwSignal, Update};

use crate::net::api::ApiError;
use crate::net::types::{ChatExchangeResult, ChatMessage, ChatRequest, ExchangeStatus};

pub const GREETING: &str =
    "Hi there! 👋 I'm here to support you with your mental health and well-being. How are you feeling today?";

pub const SUGGESTIONS: [&str; 4] = [
    "I'm feeling anxious",
    "How can I manage stress?",
    "I'm having trouble sleeping",
    "What are some self-care tips?",
];

pub const FAILURE_TITLE: &str = "Error";
pub const FAILURE_DESCRIPTION: &str = "Failed to get response from the chatbot. Please try again.";

/// Marker the backend and this client use when a reply cites sources.
pub const CITATION_MARKER: char = '📚';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Transient, non-blocking error notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Increases per notice so views can restart dismissal timers.
    pub seq: u64,
    pub title: String,
    pub description: String,
}

/// Request payload captured when a turn begins.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingExchange {
    pub message: String,
    /// The log as it stood before this turn's user message.
    pub history: Vec<ChatMessage>,
    /// Conversation epoch the turn was started in.
    pub epoch: u64,
}

impl PendingExchange {
    pub fn request(&self) -> ChatRequest<'_> {
        ChatRequest { message: &self.message, chat_history: &self.history }
    }
}

/// Result of driving one `send_message` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Assistant reply appended with this id.
    Replied(u64),
    /// Exchange failed; a notice was raised.
    Failed(String),
    /// Input was blank or another exchange is outstanding; nothing changed.
    Refused,
    /// The conversation was reset while the exchange ran; the reply was dropped.
    Discarded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    phase: TurnPhase,
    next_id: u64,
    notice: Option<Notice>,
    notice_seq: u64,
    epoch: u64,
}

impl Conversation {
    /// Fresh conversation seeded with the assistant greeting.
    #[must_use]
    pub fn new(now: f64) -> Self {
        let greeting = ChatMessage { id: 1, text: GREETING.to_owned(), is_user: false, timestamp: now };
        Self { messages: vec![greeting], phase: TurnPhase::Idle, next_id: 2, notice: None, notice_seq: 0, epoch: 0 }
    }

    /// Start over with only the greeting, abandoning any outstanding turn.
    ///
    /// Notice sequence numbers keep increasing so a dismissal timer from
    /// before the reset cannot clear a later notice.
    pub fn reset(&mut self, now: f64) {
        *self = Self { notice_seq: self.notice_seq, epoch: self.epoch + 1, ..Self::new(now) };
        log::debug!("conversation reset (epoch {})", self.epoch);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[cfg(test)]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == TurnPhase::AwaitingResponse
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clear the notice if it is still the one identified by `seq`.
    pub fn dismiss_notice(&mut self, seq: u64) {
        if self.notice.as_ref().is_some_and(|n| n.seq == seq) {
            self.notice = None;
        }
    }

    /// Start a turn: append the trimmed user text and enter `AwaitingResponse`.
    ///
    /// Returns `None` without touching state for blank input or while a
    /// previous exchange is outstanding.
    pub fn begin_turn(&mut self, text: &str, now: f64) -> Option<PendingExchange> {
        let text = text.trim();
        if text.is_empty() || self.is_awaiting() {
            return None;
        }
        let pending = PendingExchange { message: text.to_owned(), history: self.messages.clone(), epoch: self.epoch };
        self.push(text.to_owned(), true, now);
        self.phase = TurnPhase::AwaitingResponse;
        log::debug!("chat turn started ({} messages)", self.messages.len());
        Some(pending)
    }

    /// Settle the turn `pending` with the exchange result and return to `Idle`.
    pub fn finish_turn(
        &mut self,
        pending: &PendingExchange,
        result: Result<ChatExchangeResult, ApiError>,
        now: f64,
    ) -> TurnOutcome {
        if pending.epoch != self.epoch {
            log::debug!("dropping reply for a turn from epoch {}", pending.epoch);
            return TurnOutcome::Discarded;
        }
        if !self.is_awaiting() {
            return TurnOutcome::Refused;
        }
        self.phase = TurnPhase::Idle;

        let failure = match result {
            Ok(reply) if reply.status == ExchangeStatus::Success => {
                let id = self.push(compose_reply(&reply), false, now);
                log::debug!("chat turn finished with reply {id}");
                return TurnOutcome::Replied(id);
            }
            Ok(reply) => ApiError::Rejected(reply.error_detail.unwrap_or_else(|| "no detail".to_owned())),
            Err(err) => err,
        }
        .to_string();

        log::warn!("chat exchange failed: {failure}");
        self.notice_seq += 1;
        self.notice = Some(Notice {
            seq: self.notice_seq,
            title: FAILURE_TITLE.to_owned(),
            description: FAILURE_DESCRIPTION.to_owned(),
        });
        TurnOutcome::Failed(failure)
    }

    fn push(&mut self, text: String, is_user: bool, now: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, text, is_user, timestamp: now });
        id
    }
}

/// Shared handle to a [`Conversation`] that async turns can update.
///
/// The view uses its reactive signal; tests use plain cells.
pub trait ConversationCell {
    /// Apply `f`, or return `None` once the conversation is gone.
    fn update_with<R>(&self, f: impl FnOnce(&mut Conversation) -> R) -> Option<R>;
}

impl ConversationCell for RefCell<Conversation> {
    fn update_with<R>(&self, f: impl FnOnce(&mut Conversation) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl ConversationCell for Mutex<Conversation> {
    fn update_with<R>(&self, f: impl FnOnce(&mut Conversation) -> R) -> Option<R> {
        Some(f(&mut self.lock().unwrap_or_else(PoisonError::into_inner)))
    }
}

impl ConversationCell for RwSignal<Conversation> {
    fn update_with<R>(&self, f: impl FnOnce(&mut Conversation) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Assistant text for a successful reply, with a citation footer when the
/// backend grounded it in knowledge-base sources it did not already cite.
#[must_use]
pub fn compose_reply(reply: &ChatExchangeResult) -> String {
    let mut text = reply.response_text.clone();
    if reply.used_knowledge_base && !reply.sources.is_empty() && !text.contains(CITATION_MARKER) {
        let sources = unique_sources(&reply.sources).join(", ");
        text.push_str(&format!("\n\n{CITATION_MARKER} *Based on: {sources}*"));
    }
    text
}

/// Source names with duplicates removed, first occurrence order kept.
#[must_use]
pub fn unique_sources(sources: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(sources.len());
    for source in sources {
        if !unique.contains(&source.as_str()) {
            unique.push(source);
        }
    }
    unique
}
