//! UseCase: process one inbound chat message.
//!
//! The single orchestration path for a message: screen it, persist the
//! user turn, show it to the room, then produce the bot reply in the
//! background and persist/broadcast it. The synchronous part ends the
//! moment the reply work is handed to the dispatcher — the connection
//! handler never waits on inference.
//!
//! Guarantees, per message:
//! - the user-turn broadcast always precedes the bot-turn or error
//!   broadcast;
//! - once the composing indicator was shown, exactly one clearing
//!   indicator follows, whatever the terminal state;
//! - every accepted message ends in either both turns broadcast or one
//!   `error` event — never silence.
//!
//! No ordering is guaranteed between different messages in the same room;
//! their pipelines run concurrently and complete in whatever order the
//! responder answers.

use std::sync::Arc;
use std::time::Duration;

use parlor_shared::time::Clock;

use crate::domain::{
    ChatTurn, MessagePolicy, Responder, RoomId, Timestamp, TurnStore, TurnStoreError, UserId,
    ValidationOutcome,
};
use crate::infrastructure::TaskDispatcher;
use crate::infrastructure::dto::websocket::ServerEvent;

use super::broadcast::RoomBroadcaster;
use super::error::{ErrorCode, MessageFailure};

/// One inbound chat message, already shaped by the transport layer.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub content: String,
    pub display_name: Option<String>,
}

/// Tunables for the background reply phase.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    /// Shown instead of failing the turn when the responder produces no
    /// usable text: a degraded but visible reply beats silence.
    pub fallback_text: String,
    /// Bound on one responder call; exceeding it fails the message with
    /// `AI_TIMEOUT`.
    pub reply_timeout: Duration,
}

impl Default for ReplySettings {
    fn default() -> Self {
        Self {
            fallback_text: "Sorry, I could not come up with a reply just now.".to_string(),
            reply_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct ProcessMessageUseCase {
    policy: MessagePolicy,
    turn_store: Arc<dyn TurnStore>,
    responder: Arc<dyn Responder>,
    broadcaster: RoomBroadcaster,
    dispatcher: Arc<TaskDispatcher>,
    clock: Arc<dyn Clock>,
    settings: ReplySettings,
}

impl ProcessMessageUseCase {
    pub fn new(
        policy: MessagePolicy,
        turn_store: Arc<dyn TurnStore>,
        responder: Arc<dyn Responder>,
        broadcaster: RoomBroadcaster,
        dispatcher: Arc<TaskDispatcher>,
        clock: Arc<dyn Clock>,
        settings: ReplySettings,
    ) -> Self {
        Self {
            policy,
            turn_store,
            responder,
            broadcaster,
            dispatcher,
            clock,
            settings,
        }
    }

    /// Run the synchronous phase: screen, persist the user turn, broadcast
    /// it, show the composing indicator, and dispatch the reply work.
    ///
    /// A failure here is already announced to the room as an `error` event
    /// when this returns `Err`; the caller only needs to log.
    ///
    /// # Returns
    ///
    /// * `Ok(ChatTurn)` - The persisted user turn; a reply task is running
    /// * `Err(MessageFailure)` - The message is terminal, nothing dispatched
    pub async fn execute(&self, message: InboundMessage) -> Result<ChatTurn, MessageFailure> {
        let InboundMessage {
            room_id,
            user_id,
            content,
            display_name,
        } = message;

        let normalized = match self.policy.screen(&content) {
            ValidationOutcome::Accepted(text) => text,
            ValidationOutcome::Rejected { message } => {
                let failure = MessageFailure::new(ErrorCode::InvalidInput, message);
                self.announce_failure(&room_id, &failure).await;
                return Err(failure);
            }
        };

        let user_turn = ChatTurn::user(
            room_id.clone(),
            user_id.clone(),
            normalized.clone(),
            Timestamp::new(self.clock.now_millis()),
        );
        if let Err(e) = self.turn_store.append(user_turn.clone()).await {
            tracing::error!("Failed to persist user turn for room '{}': {}", room_id, e);
            let failure = save_failure(&e, "Failed to save the message");
            self.announce_failure(&room_id, &failure).await;
            return Err(failure);
        }

        // participants see the user's message before inference starts
        self.broadcaster
            .broadcast(&room_id, &ServerEvent::new_message(&user_turn, display_name))
            .await;
        self.broadcaster
            .broadcast(&room_id, &ServerEvent::BotTyping { status: true })
            .await;

        let this = self.clone();
        let task_room = room_id.clone();
        let task_user = user_id.clone();
        self.dispatcher.dispatch(async move {
            this.respond(task_room, task_user, normalized).await;
        });

        Ok(user_turn)
    }

    /// Background phase: produce, persist, and broadcast the bot turn, or
    /// announce the failure. Runs on a dispatcher worker; nothing escapes
    /// this function.
    async fn respond(&self, room_id: RoomId, user_id: UserId, prompt: String) {
        match self.produce_reply(&room_id, &user_id, &prompt).await {
            Ok(bot_turn) => {
                self.broadcaster
                    .broadcast(&room_id, &ServerEvent::new_message(&bot_turn, None))
                    .await;
            }
            Err(failure) => {
                tracing::warn!(
                    "Reply for room '{}' failed with {}: {}",
                    room_id,
                    failure.code.as_str(),
                    failure.message
                );
                self.announce_failure(&room_id, &failure).await;
            }
        }

        // single call site: the composing indicator is cleared exactly once
        // per message, whichever way the reply went
        self.broadcaster
            .broadcast(&room_id, &ServerEvent::BotTyping { status: false })
            .await;
    }

    async fn produce_reply(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        prompt: &str,
    ) -> Result<ChatTurn, MessageFailure> {
        if !self.responder.is_ready().await {
            // one lazy initialization attempt before giving up
            if let Err(e) = self.responder.ensure_ready().await {
                tracing::error!("Responder initialization failed: {}", e);
                return Err(MessageFailure::new(
                    ErrorCode::AiUnavailable,
                    "The responder is not available right now",
                ));
            }
        }

        let reply = match tokio::time::timeout(
            self.settings.reply_timeout,
            self.responder.reply(prompt),
        )
        .await
        {
            Err(_) => {
                return Err(MessageFailure::new(
                    ErrorCode::AiTimeout,
                    "The responder took too long to reply",
                ));
            }
            Ok(Err(e)) => {
                tracing::warn!("Responder call failed: {}", e);
                return Err(MessageFailure::new(
                    ErrorCode::AiError,
                    "Failed to generate a reply",
                ));
            }
            Ok(Ok(reply)) => reply,
        };

        let text = match reply {
            Some(text) if !text.trim().is_empty() => text,
            _ => self.settings.fallback_text.clone(),
        };

        let bot_turn = ChatTurn::bot(
            room_id.clone(),
            user_id.clone(),
            text,
            Timestamp::new(self.clock.now_millis()),
        );
        if let Err(e) = self.turn_store.append(bot_turn.clone()).await {
            // the user turn stays persisted; an orphaned user turn is
            // accepted over a compensating rollback
            tracing::error!("Failed to persist bot turn for room '{}': {}", room_id, e);
            return Err(save_failure(&e, "Failed to save the reply"));
        }

        Ok(bot_turn)
    }

    async fn announce_failure(&self, room_id: &RoomId, failure: &MessageFailure) {
        let event = ServerEvent::error(
            failure.message.clone(),
            Some(failure.code.as_str().to_string()),
        );
        self.broadcaster.broadcast(room_id, &event).await;
    }
}

fn save_failure(error: &TurnStoreError, fallback_message: &str) -> MessageFailure {
    match error {
        TurnStoreError::Denied(reason) => {
            MessageFailure::new(ErrorCode::Unauthorized, reason.clone())
        }
        _ => MessageFailure::new(ErrorCode::SaveError, fallback_message),
    }
}
