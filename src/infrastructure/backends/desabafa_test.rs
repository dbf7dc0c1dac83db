use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::chat_reply_fixture;

use super::DesabafaApi;
use crate::domain::models::AudioClip;
use crate::domain::models::Backend;
use crate::domain::models::ChatRequest;
use crate::domain::models::Sender;
use crate::domain::models::SessionTypeId;
use crate::domain::models::TherapistId;

impl DesabafaApi {
    fn with_url(url: String) -> DesabafaApi {
        return DesabafaApi::new(&url, 500);
    }
}

#[tokio::test]
async fn it_creates_anonymous_users() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/anonymous-user")
        .with_status(201)
        .with_body(
            json!({
                "user_id": 12,
                "anonymous_token": "anonymous_abc@desabafa.ai",
                "free_sessions_remaining": 2
            })
            .to_string(),
        )
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let user = backend.create_anonymous_user().await?;
    mock.assert_async().await;

    assert_eq!(user.id, 12);
    assert_eq!(user.free_sessions_remaining, 2);
    assert!(user.is_anonymous);
    assert!(!user.subscription_active);

    return Ok(());
}

#[tokio::test]
async fn it_fails_creating_anonymous_users() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/anonymous-user")
        .with_status(500)
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let res = backend.create_anonymous_user().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_creates_sessions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/sessions")
        .match_body(Matcher::Json(json!({
            "user_id": 12,
            "session_type": "autoestima",
            "therapist_profile": "psicologo"
        })))
        .with_status(201)
        .with_body(json!({ "id": 99, "user_id": 12, "is_active": true }).to_string())
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let session = backend
        .create_session(12, SessionTypeId::Autoestima, TherapistId::Psicologo)
        .await?;
    mock.assert_async().await;

    assert_eq!(session.id, 99);
    assert_eq!(session.user_id, 12);
    assert_eq!(session.session_type, SessionTypeId::Autoestima);
    assert_eq!(session.therapist, TherapistId::Psicologo);

    return Ok(());
}

#[tokio::test]
async fn it_saves_messages() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/sessions/99/messages")
        .match_body(Matcher::Json(json!({
            "sender": "user",
            "message": "estou ansiosa"
        })))
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    backend
        .save_message(99, Sender::User, "estou ansiosa")
        .await?;
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_gets_chat_replies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ai/chat")
        .match_body(Matcher::Json(json!({
            "session_id": 99,
            "message": "estou ansiosa",
            "generate_audio": true,
            "voice": "nova"
        })))
        .with_status(200)
        .with_body(chat_reply_fixture())
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let reply = backend
        .chat(ChatRequest {
            session_id: 99,
            message: "estou ansiosa".to_string(),
            generate_audio: true,
            voice: "nova".to_string(),
        })
        .await?;
    mock.assert_async().await;

    assert_eq!(reply.message_id, Some(100));
    assert!(reply.has_audio);
    assert_eq!(
        reply.audio_url,
        Some("/api/audio/download/ai_response_1a2b3c4d.mp3".to_string())
    );
    insta::assert_snapshot!(reply.message, @"Entendo. A ansiedade pode ser muito pesada. Quer me contar o que está acontecendo?");

    return Ok(());
}

#[tokio::test]
async fn it_gets_chat_replies_without_audio() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ai/chat")
        .with_status(200)
        .with_body(json!({ "message": "Oi", "message_id": 3 }).to_string())
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let reply = backend
        .chat(ChatRequest {
            session_id: 1,
            message: "oi".to_string(),
            generate_audio: false,
            voice: "nova".to_string(),
        })
        .await?;
    mock.assert_async().await;

    assert!(!reply.has_audio);
    assert!(reply.audio_url.is_none());
    assert!(reply.timestamp.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_fails_chat_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/ai/chat")
        .with_status(403)
        .with_body(json!({ "error": "Sessões gratuitas esgotadas." }).to_string())
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let res = backend
        .chat(ChatRequest {
            session_id: 1,
            message: "oi".to_string(),
            generate_audio: false,
            voice: "nova".to_string(),
        })
        .await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_transcribes_audio() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/audio/speech-to-text")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("name=\"audio\"; filename=\"audio.wav\"".to_string()),
            Matcher::Regex("name=\"session_id\"".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({ "transcription": "estou ansiosa", "message_id": 5 }).to_string())
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let text = backend
        .speech_to_text(99, AudioClip::wav(b"RIFF....WAVE".to_vec()))
        .await?;
    mock.assert_async().await;

    assert_eq!(text, "estou ansiosa");

    return Ok(());
}

#[tokio::test]
async fn it_lists_sessions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/users/12/sessions")
        .with_status(200)
        .with_body(
            json!({
                "sessions": [{
                    "id": 99,
                    "user_id": 12,
                    "session_type": "autoestima",
                    "therapist_profile": "psicologo",
                    "created_at": "2024-05-01T10:00:00",
                    "ended_at": null,
                    "is_active": true,
                    "message_count": 4
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    let sessions = backend.list_sessions(12).await?;
    mock.assert_async().await;

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, 99);
    assert_eq!(sessions[0].therapist_profile, "psicologo");
    assert_eq!(sessions[0].message_count, 4);
    assert!(sessions[0].is_active);

    return Ok(());
}

#[tokio::test]
async fn it_defaults_missing_lists() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let sessions_mock = server
        .mock("GET", "/api/users/12/sessions")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let reports_mock = server
        .mock("GET", "/api/users/12/reports")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let backend = DesabafaApi::with_url(server.url());
    assert!(backend.list_sessions(12).await?.is_empty());
    assert!(backend.list_reports(12).await?.is_empty());
    sessions_mock.assert_async().await;
    reports_mock.assert_async().await;

    return Ok(());
}

#[test]
fn it_resolves_audio_urls() {
    let backend = DesabafaApi::with_url("http://localhost:5001/".to_string());

    assert_eq!(
        backend.resolve_audio_url("/api/audio/download/a.mp3"),
        "http://localhost:5001/api/audio/download/a.mp3"
    );
    assert_eq!(
        backend.resolve_audio_url("https://cdn.example.com/a.mp3"),
        "https://cdn.example.com/a.mp3"
    );
}
