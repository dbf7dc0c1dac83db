use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::AudioClip;
use super::Report;
use super::Sender;
use super::Session;
use super::SessionSummary;
use super::SessionTypeId;
use super::TherapistId;
use super::UserRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: i64,
    pub message: String,
    pub generate_audio: bool,
    pub voice: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub message_id: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub has_audio: bool,
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[async_trait]
pub trait Backend {
    /// Provisions a fresh anonymous identity. The backend decides how many
    /// free sessions it comes with.
    async fn create_anonymous_user(&self) -> Result<UserRecord>;

    /// Opens a conversation for a user with the chosen session type and
    /// therapist persona.
    async fn create_session(
        &self,
        user_id: i64,
        session_type: SessionTypeId,
        therapist: TherapistId,
    ) -> Result<Session>;

    /// Appends a message to the backend session log.
    async fn save_message(&self, session_id: i64, sender: Sender, text: &str) -> Result<()>;

    /// Requests the therapist's reply, optionally with synthesized speech.
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply>;

    async fn speech_to_text(&self, session_id: i64, clip: AudioClip) -> Result<String>;

    async fn list_sessions(&self, user_id: i64) -> Result<Vec<SessionSummary>>;

    async fn list_reports(&self, user_id: i64) -> Result<Vec<Report>>;

    /// Audio URLs are handed out relative to the backend, this turns them into
    /// something a player can open.
    fn resolve_audio_url(&self, path: &str) -> String;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;

/// How one message exchange ended. Transport errors and non-success statuses
/// both end up as `Failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Replied(ChatReply),
    Failed,
}
