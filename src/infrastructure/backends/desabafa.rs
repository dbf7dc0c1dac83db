#[cfg(test)]
#[path = "desabafa_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AudioClip;
use crate::domain::models::Backend;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatRequest;
use crate::domain::models::Report;
use crate::domain::models::Sender;
use crate::domain::models::Session;
use crate::domain::models::SessionSummary;
use crate::domain::models::SessionTypeId;
use crate::domain::models::TherapistId;
use crate::domain::models::UserRecord;

fn default_free_sessions() -> i64 {
    return 3;
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AnonymousUserResponse {
    user_id: i64,
    #[serde(default = "default_free_sessions")]
    free_sessions_remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionRequest {
    user_id: i64,
    session_type: SessionTypeId,
    therapist_profile: TherapistId,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionResponse {
    id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    sender: Sender,
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TranscriptionResponse {
    transcription: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionListResponse {
    #[serde(default)]
    sessions: Vec<SessionSummary>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ReportListResponse {
    #[serde(default)]
    reports: Vec<Report>,
}

/// REST client for the Desabafa.AI backend.
pub struct DesabafaApi {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl Default for DesabafaApi {
    fn default() -> DesabafaApi {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(30000);

        return DesabafaApi::new(&Config::get(ConfigKey::ApiURL), timeout);
    }
}

impl DesabafaApi {
    pub fn new(url: &str, timeout_ms: u64) -> DesabafaApi {
        return DesabafaApi {
            url: url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url);
    }

    fn check_status(res: &reqwest::Response, what: &str) -> Result<()> {
        let status = res.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Failed to {what}");
            bail!(format!("Failed to {what}, backend returned {status}"));
        }

        return Ok(());
    }
}

#[async_trait]
impl Backend for DesabafaApi {
    #[allow(clippy::implicit_return)]
    async fn create_anonymous_user(&self) -> Result<UserRecord> {
        let res = self
            .client
            .post(self.endpoint("/api/anonymous-user"))
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        DesabafaApi::check_status(&res, "create anonymous user")?;

        let body = res.json::<AnonymousUserResponse>().await?;
        tracing::debug!(user_id = body.user_id, "Anonymous user created");

        return Ok(UserRecord::anonymous(
            body.user_id,
            body.free_sessions_remaining,
        ));
    }

    #[allow(clippy::implicit_return)]
    async fn create_session(
        &self,
        user_id: i64,
        session_type: SessionTypeId,
        therapist: TherapistId,
    ) -> Result<Session> {
        let req = SessionRequest {
            user_id,
            session_type,
            therapist_profile: therapist,
        };

        let res = self
            .client
            .post(self.endpoint("/api/sessions"))
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await?;
        DesabafaApi::check_status(&res, "create session")?;

        let body = res.json::<SessionResponse>().await?;
        tracing::debug!(session_id = body.id, "Session created");

        return Ok(Session {
            id: body.id,
            user_id,
            session_type,
            therapist,
        });
    }

    #[allow(clippy::implicit_return)]
    async fn save_message(&self, session_id: i64, sender: Sender, text: &str) -> Result<()> {
        let req = MessageRequest {
            sender,
            message: text.to_string(),
        };

        let res = self
            .client
            .post(self.endpoint(&format!("/api/sessions/{session_id}/messages")))
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await?;
        DesabafaApi::check_status(&res, "save message")?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply> {
        let res = self
            .client
            .post(self.endpoint("/api/ai/chat"))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;
        DesabafaApi::check_status(&res, "get a reply from the therapist")?;

        let reply = res.json::<ChatReply>().await?;
        tracing::debug!(body = ?reply, "Chat response");

        return Ok(reply);
    }

    #[allow(clippy::implicit_return)]
    async fn speech_to_text(&self, session_id: i64, clip: AudioClip) -> Result<String> {
        let part = multipart::Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.mime)?;
        let form = multipart::Form::new()
            .part("audio", part)
            .text("session_id", session_id.to_string());

        let res = self
            .client
            .post(self.endpoint("/api/audio/speech-to-text"))
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;
        DesabafaApi::check_status(&res, "transcribe audio")?;

        let body = res.json::<TranscriptionResponse>().await?;

        return Ok(body.transcription);
    }

    #[allow(clippy::implicit_return)]
    async fn list_sessions(&self, user_id: i64) -> Result<Vec<SessionSummary>> {
        let res = self
            .client
            .get(self.endpoint(&format!("/api/users/{user_id}/sessions")))
            .timeout(self.timeout)
            .send()
            .await?;
        DesabafaApi::check_status(&res, "list sessions")?;

        let body = res.json::<SessionListResponse>().await?;

        return Ok(body.sessions);
    }

    #[allow(clippy::implicit_return)]
    async fn list_reports(&self, user_id: i64) -> Result<Vec<Report>> {
        let res = self
            .client
            .get(self.endpoint(&format!("/api/users/{user_id}/reports")))
            .timeout(self.timeout)
            .send()
            .await?;
        DesabafaApi::check_status(&res, "list reports")?;

        let body = res.json::<ReportListResponse>().await?;

        return Ok(body.reports);
    }

    fn resolve_audio_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        return self.endpoint(path);
    }
}
