use anyhow::Result;
use tempfile::TempDir;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::ChatOutcome;
use crate::domain::models::ChatReply;
use crate::domain::models::Dashboard;
use crate::domain::models::Delivery;
use crate::domain::models::Event;
use crate::domain::models::NavAction;
use crate::domain::models::Sender;
use crate::domain::models::Session;
use crate::domain::models::SessionTypeId;
use crate::domain::models::Therapist;
use crate::domain::models::TherapistId;
use crate::domain::models::UserRecord;
use crate::domain::models::View;
use crate::domain::models::FALLBACK_REPLY;
use crate::domain::services::ChatSession;
use crate::domain::services::UserStore;

async fn app_state(dir: &TempDir) -> Result<AppState<'static>> {
    let store = UserStore::new(dir.path().join("desabafa_user.yaml"));
    let mut app_state = AppState::new(store, ChatSession::new(false, "nova")).await?;
    app_state.last_known_width = 80;
    app_state.last_known_height = 20;

    return Ok(app_state);
}

async fn type_text(app_state: &mut AppState<'_>, text: &str) -> Result<()> {
    for char in text.chars() {
        app_state
            .handle_event(Event::KeyboardCharInput(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            }))
            .await?;
    }

    return Ok(());
}

/// Walks landing -> session type -> therapist -> chat with the first entries.
async fn open_chat(app_state: &mut AppState<'_>) -> Result<()> {
    app_state.handle_event(Event::KeyboardEnter()).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;

    return Ok(());
}

fn session(id: i64, therapist: TherapistId) -> Session {
    return Session {
        id,
        user_id: 12,
        session_type: SessionTypeId::Autoestima,
        therapist,
    };
}

fn premium_user() -> UserRecord {
    return UserRecord {
        id: 7,
        email: "ana@example.com".to_string(),
        is_anonymous: false,
        free_sessions_remaining: 0,
        subscription_active: true,
    };
}

fn reply(text: &str) -> ChatOutcome {
    return ChatOutcome::Replied(ChatReply {
        message: text.to_string(),
        ..ChatReply::default()
    });
}

#[tokio::test]
async fn it_opens_a_chat_through_the_menus() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    assert_eq!(app_state.view.view, View::Landing);

    open_chat(&mut app_state).await?;
    assert_eq!(app_state.view.view, View::Chat);
    assert_eq!(app_state.view.session_type, Some(SessionTypeId::Autoestima));
    assert_eq!(app_state.view.therapist, Some(TherapistId::Psicologo));
    assert!(app_state.connecting);

    let actions = app_state.take_actions();
    assert_eq!(actions.len(), 1);
    assert!(matches!(
        actions[0],
        Action::StartSession(1, SessionTypeId::Autoestima, TherapistId::Psicologo)
    ));

    return Ok(());
}

#[tokio::test]
async fn it_seeds_the_greeting_and_saves_the_user() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;

    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;

    assert!(!app_state.connecting);
    assert_eq!(app_state.chat.messages().len(), 1);
    assert_eq!(app_state.chat.messages()[0].sender, Sender::Ai);
    assert_eq!(app_state.view.user.as_ref().map(|e| return e.id), Some(12));

    let saved = UserStore::new(dir.path().join("desabafa_user.yaml"))
        .load()
        .await?;
    assert_eq!(saved, Some(UserRecord::anonymous(12, 3)));

    return Ok(());
}

#[tokio::test]
async fn it_keeps_a_saved_user_when_chatting() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = UserStore::new(dir.path().join("desabafa_user.yaml"));
    store.save(&premium_user()).await?;

    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;
    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;

    assert_eq!(app_state.chat.session().map(|e| return e.id), Some(99));
    assert_eq!(app_state.view.user, Some(premium_user()));
    assert_eq!(store.load().await?, Some(premium_user()));

    return Ok(());
}

#[tokio::test]
async fn it_drops_sessions_of_a_chat_that_was_left() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;

    app_state.handle_event(Event::KeyboardEsc()).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    assert_eq!(app_state.view.therapist, Some(TherapistId::Coach));

    let actions = app_state.take_actions();
    assert!(matches!(
        actions.last(),
        Some(Action::StartSession(2, SessionTypeId::Autoestima, TherapistId::Coach))
    ));

    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;
    app_state.handle_event(Event::BootstrapFailed(1)).await?;
    assert!(app_state.connecting);
    assert!(app_state.chat.session().is_none());
    assert!(app_state.chat.messages().is_empty());

    app_state
        .handle_event(Event::SessionStarted(
            2,
            UserRecord::anonymous(13, 3),
            session(100, TherapistId::Coach),
        ))
        .await?;
    assert!(!app_state.connecting);
    assert_eq!(app_state.chat.session().map(|e| return e.id), Some(100));
    assert_eq!(app_state.chat.messages().len(), 1);
    assert_eq!(
        app_state.chat.messages()[0].text,
        Therapist::get(TherapistId::Coach).greeting
    );

    return Ok(());
}

#[tokio::test]
async fn it_drops_replies_for_a_session_that_was_left() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;
    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;
    type_text(&mut app_state, "primeira").await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;

    app_state.handle_event(Event::KeyboardEsc()).await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    app_state
        .handle_event(Event::SessionStarted(
            2,
            UserRecord::anonymous(12, 3),
            session(100, TherapistId::Psicologo),
        ))
        .await?;
    type_text(&mut app_state, "segunda").await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    app_state.take_actions();

    app_state
        .handle_event(Event::ChatSettled(99, reply("resposta velha")))
        .await?;
    app_state
        .handle_event(Event::Transcribed(99, "gravação velha".to_string()))
        .await?;
    assert!(app_state.take_actions().is_empty());
    assert_eq!(app_state.chat.messages().len(), 2);
    assert_eq!(app_state.chat.messages()[1].text, "segunda");
    assert_eq!(app_state.chat.messages()[1].delivery(), Delivery::Pending);

    app_state
        .handle_event(Event::ChatSettled(100, reply("resposta nova")))
        .await?;
    let messages = app_state.chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].delivery(), Delivery::Confirmed);
    assert_eq!(messages[2].text, "resposta nova");

    return Ok(());
}

#[tokio::test]
async fn it_sends_typed_messages_once() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;
    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;
    app_state.take_actions();

    type_text(&mut app_state, "estou ansiosa").await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    assert_eq!(app_state.textarea.lines().join(""), "");

    type_text(&mut app_state, "de novo").await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    assert_eq!(app_state.textarea.lines().join(""), "de novo");

    let actions = app_state.take_actions();
    assert_eq!(actions.len(), 1);
    match &actions[0] {
        Action::SendMessage(request) => {
            assert_eq!(request.session_id, 99);
            assert_eq!(request.message, "estou ansiosa");
        }
        action => panic!("unexpected action {action:?}"),
    }

    app_state
        .handle_event(Event::ChatSettled(99, ChatOutcome::Failed))
        .await?;
    let messages = app_state.chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, FALLBACK_REPLY);

    return Ok(());
}

#[tokio::test]
async fn it_ignores_enter_before_the_session_exists() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;
    app_state.take_actions();

    type_text(&mut app_state, "oi").await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    app_state.handle_event(Event::BootstrapFailed(1)).await?;

    assert!(app_state.take_actions().is_empty());
    assert!(app_state.chat.messages().is_empty());
    assert!(!app_state.connecting);

    return Ok(());
}

#[tokio::test]
async fn it_sends_transcripts_as_voice_messages() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;
    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;
    app_state.take_actions();

    app_state.handle_event(Event::KeyboardCTRLR()).await?;
    app_state.handle_event(Event::RecordingChanged(true)).await?;
    app_state.handle_event(Event::KeyboardCTRLR()).await?;

    let actions = app_state.take_actions();
    assert!(matches!(actions[0], Action::StartRecording()));
    assert!(matches!(actions[1], Action::StopRecording(Some(99))));

    app_state
        .handle_event(Event::Transcribed(99, "não consigo dormir".to_string()))
        .await?;
    assert!(app_state.chat.messages()[1].transcribed);
    assert!(matches!(
        app_state.take_actions()[0],
        Action::SendMessage(_)
    ));

    return Ok(());
}

#[tokio::test]
async fn it_plays_the_last_audio_reply() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    open_chat(&mut app_state).await?;
    app_state
        .handle_event(Event::SessionStarted(
            1,
            UserRecord::anonymous(12, 3),
            session(99, TherapistId::Psicologo),
        ))
        .await?;
    type_text(&mut app_state, "oi").await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;
    app_state
        .handle_event(Event::ChatSettled(99, ChatOutcome::Replied(ChatReply {
            message: "Olá".to_string(),
            has_audio: true,
            audio_url: Some("/api/audio/download/a.mp3".to_string()),
            ..ChatReply::default()
        })))
        .await?;
    app_state.take_actions();

    app_state.handle_event(Event::KeyboardCTRLP()).await?;
    match &app_state.take_actions()[0] {
        Action::PlayAudio(url) => assert_eq!(url, "/api/audio/download/a.mp3"),
        action => panic!("unexpected action {action:?}"),
    }

    app_state
        .handle_event(Event::PlaybackChanged(Some("/api/audio/download/a.mp3".to_string())))
        .await?;
    app_state.handle_event(Event::KeyboardEsc()).await?;

    assert_eq!(app_state.view.view, View::TherapistSelection);
    assert!(app_state.chat.session().is_none());
    assert!(matches!(app_state.take_actions()[0], Action::StopAudio()));

    return Ok(());
}

#[tokio::test]
async fn it_logs_in_anonymously_from_the_dashboard() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    app_state.navigate(NavAction::ShowDashboard).await?;
    assert!(app_state.view.needs_login());
    assert!(app_state.take_actions().is_empty());

    app_state.handle_event(Event::KeyboardEnter()).await?;
    assert!(matches!(
        app_state.take_actions()[0],
        Action::ProvisionUser()
    ));

    app_state
        .handle_event(Event::UserProvisioned(UserRecord::anonymous(5, 3)))
        .await?;
    assert_eq!(app_state.view.view, View::Dashboard);
    assert!(!app_state.view.needs_login());
    match &app_state.take_actions()[0] {
        Action::LoadDashboard(user) => assert_eq!(user.id, 5),
        action => panic!("unexpected action {action:?}"),
    }

    app_state
        .handle_event(Event::DashboardLoaded(5, Dashboard::default()))
        .await?;
    assert!(app_state.dashboard.is_some());

    let labels = app_state
        .menu()
        .into_iter()
        .map(|e| return e.label)
        .collect::<Vec<String>>();
    assert_eq!(labels, vec!["Nova sessão", "Fazer upgrade", "Sair"]);

    return Ok(());
}

#[tokio::test]
async fn it_forgets_the_user_on_logout() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = UserStore::new(dir.path().join("desabafa_user.yaml"));
    store.save(&UserRecord::anonymous(5, 1)).await?;

    let mut app_state = app_state(&dir).await?;
    assert_eq!(app_state.view.user.as_ref().map(|e| return e.id), Some(5));

    app_state.navigate(NavAction::ShowDashboard).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    assert_eq!(app_state.menu_index, 2);
    app_state.handle_event(Event::KeyboardEnter()).await?;

    assert_eq!(app_state.view.view, View::Landing);
    assert!(app_state.view.user.is_none());
    assert!(store.load().await?.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_drops_dashboards_arriving_after_logout() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = UserStore::new(dir.path().join("desabafa_user.yaml"));
    store.save(&UserRecord::anonymous(5, 1)).await?;

    let mut app_state = app_state(&dir).await?;
    app_state.navigate(NavAction::ShowDashboard).await?;
    app_state.navigate(NavAction::Logout).await?;
    app_state
        .handle_event(Event::DashboardLoaded(5, Dashboard::default()))
        .await?;

    assert!(app_state.dashboard.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_selects_plans_and_shows_notices() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    app_state.navigate(NavAction::ShowPricing).await?;
    app_state.handle_event(Event::UIScrollDown()).await?;
    app_state.handle_event(Event::KeyboardEnter()).await?;

    match &app_state.take_actions()[0] {
        Action::SelectPlan(plan_id) => assert_eq!(plan_id, "premium"),
        action => panic!("unexpected action {action:?}"),
    }

    app_state
        .handle_event(Event::Notice("Plano Premium selecionado!".to_string()))
        .await?;
    assert_eq!(
        app_state.notice,
        Some("Plano Premium selecionado!".to_string())
    );

    app_state.handle_event(Event::KeyboardEsc()).await?;
    assert_eq!(app_state.view.view, View::Landing);
    assert!(app_state.notice.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_quits_on_ctrl_c() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut app_state = app_state(&dir).await?;
    app_state.handle_event(Event::KeyboardCTRLC()).await?;

    assert!(app_state.should_quit);

    return Ok(());
}
