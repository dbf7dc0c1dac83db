#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::Result;

use super::bootstrap;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatRequest;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::Session;
use crate::domain::models::SessionTypeId;
use crate::domain::models::Therapist;
use crate::domain::models::TherapistId;
use crate::domain::models::UserRecord;

/// Why a send never left the client. None of these touch the message list or
/// the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum SendRejection {
    #[strum(serialize = "message is empty")]
    EmptyText,
    #[strum(serialize = "no session is active")]
    NoSession,
    #[strum(serialize = "a message is already being sent")]
    InFlight,
}

/// Persists the user message, then asks for the therapist's reply. Any
/// failure along the way is logged and collapses to `ChatOutcome::Failed`.
pub async fn exchange(backend: &BackendBox, request: ChatRequest) -> ChatOutcome {
    if let Err(err) = backend
        .save_message(request.session_id, Sender::User, &request.message)
        .await
    {
        tracing::error!(error = ?err, session_id = request.session_id, "Failed to save message");
        return ChatOutcome::Failed;
    }

    match backend.chat(request).await {
        Ok(reply) => return ChatOutcome::Replied(reply),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to get a reply");
            return ChatOutcome::Failed;
        }
    }
}

/// Conversation state for one chat screen: the active session, the ordered
/// message list and the outstanding send, if any.
pub struct ChatSession {
    session: Option<Session>,
    messages: Vec<Message>,
    pending: Option<usize>,
    generate_audio: bool,
    voice: String,
}

impl Default for ChatSession {
    fn default() -> ChatSession {
        return ChatSession::new(
            Config::get_bool(ConfigKey::GenerateAudio),
            &Config::get(ConfigKey::Voice),
        );
    }
}

impl ChatSession {
    pub fn new(generate_audio: bool, voice: &str) -> ChatSession {
        return ChatSession {
            session: None,
            messages: vec![],
            pending: None,
            generate_audio,
            voice: voice.to_string(),
        };
    }

    pub fn session(&self) -> Option<&Session> {
        return self.session.as_ref();
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn is_in_flight(&self) -> bool {
        return self.pending.is_some();
    }

    /// Drops the session and every message. Used when leaving the chat.
    pub fn reset(&mut self) {
        self.session = None;
        self.messages = vec![];
        self.pending = None;
    }

    /// Activates a freshly created session and seeds the conversation with the
    /// therapist's greeting.
    pub fn start(&mut self, session: Session) {
        let greeting = Therapist::get(session.therapist).greeting;
        self.session = Some(session);
        self.messages = vec![Message::ai(greeting)];
        self.pending = None;
    }

    /// Runs the whole bootstrap: a new anonymous user, a session for it and the
    /// greeting. On failure no session is set and sends stay rejected.
    pub async fn initialize_anonymous_session(
        &mut self,
        backend: &BackendBox,
        session_type: SessionTypeId,
        therapist: TherapistId,
    ) -> Result<UserRecord> {
        let (user, session) = bootstrap::provision(backend, session_type, therapist).await?;
        self.start(session);

        return Ok(user);
    }

    /// First half of a send. Appends the provisional user message and returns
    /// the request the backend should receive.
    pub fn begin_send(
        &mut self,
        text: &str,
        from_audio: bool,
    ) -> Result<ChatRequest, SendRejection> {
        if text.trim().is_empty() {
            return Err(SendRejection::EmptyText);
        }

        let session_id = match &self.session {
            Some(session) => session.id,
            None => return Err(SendRejection::NoSession),
        };

        if self.pending.is_some() {
            return Err(SendRejection::InFlight);
        }

        self.messages.push(Message::user(text, from_audio));
        self.pending = Some(self.messages.len() - 1);

        return Ok(ChatRequest {
            session_id,
            message: text.to_string(),
            generate_audio: self.generate_audio,
            voice: self.voice.to_string(),
        });
    }

    /// Second half of a send. Settles the provisional message and appends
    /// either the reply or the fallback message.
    pub fn complete_send(&mut self, outcome: ChatOutcome) {
        let idx = match self.pending.take() {
            Some(idx) => idx,
            None => {
                tracing::warn!("Got a chat reply with no message outstanding");
                return;
            }
        };

        match outcome {
            ChatOutcome::Replied(reply) => {
                self.messages[idx].settle(true);
                self.messages.push(Message::from_reply(reply));
            }
            ChatOutcome::Failed => {
                self.messages[idx].settle(false);
                self.messages.push(Message::fallback());
            }
        }
    }

    pub async fn send_message(
        &mut self,
        backend: &BackendBox,
        text: &str,
        from_audio: bool,
    ) -> Result<(), SendRejection> {
        let request = self.begin_send(text, from_audio)?;
        let outcome = exchange(backend, request).await;
        self.complete_send(outcome);

        return Ok(());
    }

    /// Audio of the most recent therapist message that has any.
    pub fn last_audio_url(&self) -> Option<&str> {
        return self
            .messages
            .iter()
            .rev()
            .filter(|e| return e.sender == Sender::Ai)
            .find_map(|e| return e.audio_url.as_deref());
    }
}
