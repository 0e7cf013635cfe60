//! Place chat
//!
//! Two phases: Unconfirmed (a place name is being typed) and Confirmed
//! (messages go to the chat endpoint). A place handed over from the result
//! card is confirmed on arrival. Once confirmed, the place never changes
//! for the lifetime of the flow.
//!
//! Messages are applied to the transcript before the request goes out and
//! settled when it returns; see [`TranscriptPolicy`].

use super::scope::ScreenScope;
use crate::api::GeoApi;
use crate::error::GeoError;
use crate::store::GeoStore;
use geogenie_common::{notice, ChatRole};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPhase {
    Unconfirmed { draft: String },
    Confirmed { place: String },
}

/// Marker for a user message that is shown but not yet answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMessage {
    index: usize,
}

impl PendingMessage {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// How a sent message ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Reply(String),
    Failed,
    Cancelled,
}

/// Apply-then-confirm handling of the transcript.
pub trait TranscriptPolicy: Send + Sync {
    fn apply(&self, store: &mut GeoStore, message: &str) -> PendingMessage {
        store.add_chat(ChatRole::User, message);
        PendingMessage {
            index: store.chat().len() - 1,
        }
    }

    fn settle(&self, store: &mut GeoStore, pending: PendingMessage, settlement: Settlement);
}

/// Keeps the user's message no matter what; a failed send is answered
/// with a fallback bot message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimistic;

impl TranscriptPolicy for Optimistic {
    fn settle(&self, store: &mut GeoStore, _pending: PendingMessage, settlement: Settlement) {
        match settlement {
            Settlement::Reply(text) => store.add_chat(ChatRole::Bot, text),
            Settlement::Failed => store.add_chat(ChatRole::Bot, notice::CHAT_SERVER_ERROR),
            Settlement::Cancelled => {}
        }
    }
}

/// Drops the user's message when no reply arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transactional;

impl TranscriptPolicy for Transactional {
    fn settle(&self, store: &mut GeoStore, pending: PendingMessage, settlement: Settlement) {
        match settlement {
            Settlement::Reply(text) => store.add_chat(ChatRole::Bot, text),
            Settlement::Failed | Settlement::Cancelled => {
                store.remove_chat(pending.index);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Replied(String),
    /// The request failed; the policy decided what the transcript shows.
    ServerError,
    /// Blank message, nothing sent.
    Ignored,
    NotConfirmed,
    Cancelled,
}

pub struct ChatFlow<'a, P: TranscriptPolicy = Optimistic> {
    api: &'a dyn GeoApi,
    scope: ScreenScope,
    phase: ChatPhase,
    typing: watch::Sender<bool>,
    policy: P,
}

impl<'a> ChatFlow<'a, Optimistic> {
    pub fn new(api: &'a dyn GeoApi, scope: ScreenScope, handoff: Option<&str>) -> Self {
        Self::with_policy(api, scope, handoff, Optimistic)
    }
}

impl<'a, P: TranscriptPolicy> ChatFlow<'a, P> {
    pub fn with_policy(
        api: &'a dyn GeoApi,
        scope: ScreenScope,
        handoff: Option<&str>,
        policy: P,
    ) -> Self {
        let (typing, _) = watch::channel(false);
        let mut flow = Self {
            api,
            scope,
            phase: ChatPhase::Unconfirmed {
                draft: handoff.unwrap_or_default().to_string(),
            },
            typing,
            policy,
        };
        if let Some(place) = handoff {
            flow.confirm_place(place);
        }
        flow
    }

    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    pub fn place(&self) -> Option<&str> {
        match &self.phase {
            ChatPhase::Confirmed { place } => Some(place),
            ChatPhase::Unconfirmed { .. } => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.place().is_some()
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    /// Edit the place name while unconfirmed. Ignored once confirmed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let ChatPhase::Unconfirmed { draft } = &mut self.phase {
            *draft = text.into();
        }
    }

    /// Whether the "Start Chat" action is enabled.
    pub fn can_confirm(&self) -> bool {
        matches!(&self.phase, ChatPhase::Unconfirmed { draft } if !draft.trim().is_empty())
    }

    /// Confirm the current draft.
    pub fn confirm(&mut self) -> bool {
        match &self.phase {
            ChatPhase::Unconfirmed { draft } => {
                let draft = draft.clone();
                self.confirm_place(&draft)
            }
            ChatPhase::Confirmed { .. } => false,
        }
    }

    /// Move to Confirmed with `name`. Returns `true` only for the single
    /// transition; blank names and repeat attempts change nothing.
    pub fn confirm_place(&mut self, name: &str) -> bool {
        if self.is_confirmed() {
            return false;
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }

        tracing::info!(place = trimmed, "chat place confirmed");
        self.phase = ChatPhase::Confirmed {
            place: trimmed.to_string(),
        };
        true
    }

    pub fn is_typing(&self) -> bool {
        *self.typing.borrow()
    }

    /// Follow the "typing" indicator from another task.
    pub fn subscribe_typing(&self) -> watch::Receiver<bool> {
        self.typing.subscribe()
    }

    /// Send one message. A single request is made; there is no retry.
    pub async fn send(&self, store: &mut GeoStore, message: &str) -> ChatOutcome {
        if message.trim().is_empty() {
            return ChatOutcome::Ignored;
        }
        let Some(place) = self.place() else {
            return ChatOutcome::NotConfirmed;
        };

        let pending = self.policy.apply(store, message);
        self.typing.send_replace(true);
        let result = self
            .scope
            .run(self.api.chat_about_place(place, message))
            .await;
        self.typing.send_replace(false);

        match result {
            Ok(reply) => {
                self.policy
                    .settle(store, pending, Settlement::Reply(reply.clone()));
                ChatOutcome::Replied(reply)
            }
            Err(GeoError::Cancelled) => {
                self.policy.settle(store, pending, Settlement::Cancelled);
                ChatOutcome::Cancelled
            }
            Err(error) => {
                tracing::warn!(place, %error, "chat request failed");
                self.policy.settle(store, pending, Settlement::Failed);
                ChatOutcome::ServerError
            }
        }
    }
}
