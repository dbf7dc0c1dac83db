#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;

use super::BubbleList;
use super::ChatSession;
use super::UserStore;
use crate::domain::models::Action;
use crate::domain::models::Dashboard;
use crate::domain::models::Event;
use crate::domain::models::NavAction;
use crate::domain::models::PricingPlan;
use crate::domain::models::SessionType;
use crate::domain::models::TextArea;
use crate::domain::models::Therapist;
use crate::domain::models::UserRecord;
use crate::domain::models::View;
use crate::domain::models::ViewState;

const PAGE_LINES: usize = 10;

/// One selectable row of a menu screen.
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Navigate(NavAction),
    ContinueAnonymous,
    SelectPlan(&'static str),
}

fn nav_item(label: &str, action: NavAction) -> MenuItem {
    return MenuItem {
        label: label.to_string(),
        action: MenuAction::Navigate(action),
    };
}

pub struct AppState<'a> {
    pub view: ViewState,
    pub chat: ChatSession,
    pub bubble_list: BubbleList,
    pub dashboard: Option<Dashboard>,
    pub textarea: tui_textarea::TextArea<'a>,
    pub menu_index: usize,
    pub notice: Option<String>,
    pub recording: bool,
    pub now_playing: Option<String>,
    pub connecting: bool,
    pub should_quit: bool,
    pub last_known_height: u16,
    pub last_known_width: u16,
    store: UserStore,
    actions: Vec<Action>,
    chat_ticket: u64,
}

impl<'a> AppState<'a> {
    pub async fn new(store: UserStore, chat: ChatSession) -> Result<AppState<'a>> {
        let user = match store.load().await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to load saved user, starting without one");
                None
            }
        };

        return Ok(AppState {
            view: ViewState::with_user(user),
            chat,
            bubble_list: BubbleList::default(),
            dashboard: None,
            textarea: TextArea::default(),
            menu_index: 0,
            notice: None,
            recording: false,
            now_playing: None,
            connecting: false,
            should_quit: false,
            last_known_height: 0,
            last_known_width: 0,
            store,
            actions: vec![],
            chat_ticket: 0,
        });
    }

    /// Work queued for the actions worker since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        return std::mem::take(&mut self.actions);
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        match self.view.view {
            View::Landing => {
                return vec![
                    nav_item("Começar a desabafar", NavAction::StartChat),
                    nav_item("Planos", NavAction::ShowPricing),
                    nav_item("Meu painel", NavAction::ShowDashboard),
                ];
            }
            View::SessionType => {
                return SessionType::all()
                    .iter()
                    .map(|e| {
                        return nav_item(
                            &format!("{} - {}", e.name, e.description),
                            NavAction::SelectSessionType(e.id),
                        );
                    })
                    .collect();
            }
            View::TherapistSelection => {
                return Therapist::all()
                    .iter()
                    .map(|e| {
                        return nav_item(
                            &format!("{} {} - {}", e.icon, e.name, e.title),
                            NavAction::SelectTherapist(e.id),
                        );
                    })
                    .collect();
            }
            View::Pricing => {
                return PricingPlan::all()
                    .iter()
                    .map(|e| {
                        return MenuItem {
                            label: format!("{} ({}{})", e.button_text, e.price, e.period),
                            action: MenuAction::SelectPlan(e.id),
                        };
                    })
                    .collect();
            }
            View::Dashboard => {
                if self.view.needs_login() {
                    return vec![MenuItem {
                        label: "Continuar como anônimo".to_string(),
                        action: MenuAction::ContinueAnonymous,
                    }];
                }

                let mut items = vec![nav_item("Nova sessão", NavAction::StartChat)];
                if !self.is_subscriber() {
                    items.push(nav_item("Fazer upgrade", NavAction::Upgrade));
                }
                items.push(nav_item("Sair", NavAction::Logout));

                return items;
            }
            View::Chat => return vec![],
        }
    }

    fn is_subscriber(&self) -> bool {
        return self
            .view
            .user
            .as_ref()
            .map(|e| return e.subscription_active)
            .unwrap_or(false);
    }

    pub async fn navigate(&mut self, action: NavAction) -> Result<()> {
        let previous = self.view.view;
        if action == NavAction::Logout {
            self.store.clear().await?;
            self.dashboard = None;
        }

        self.view = self.view.clone().transition(action);
        self.menu_index = 0;
        self.notice = None;

        if previous == View::Chat && self.view.view != View::Chat {
            self.leave_chat();
        }

        match self.view.view {
            View::Chat if previous != View::Chat => self.enter_chat(),
            View::Dashboard => {
                if let Some(user) = &self.view.user {
                    self.actions.push(Action::LoadDashboard(user.clone()));
                }
            }
            _ => (),
        }

        return Ok(());
    }

    fn enter_chat(&mut self) {
        self.chat.reset();
        self.textarea = TextArea::default();

        if let Some((session_type, therapist)) = self.view.chat_selection() {
            self.bubble_list.set_therapist(Therapist::get(therapist));
            self.chat_ticket += 1;
            self.connecting = true;
            self.actions.push(Action::StartSession(
                self.chat_ticket,
                session_type,
                therapist,
            ));
        }

        self.sync_dependants();
    }

    fn leave_chat(&mut self) {
        if self.recording {
            self.actions.push(Action::StopRecording(None));
        }
        if self.now_playing.is_some() {
            self.actions.push(Action::StopAudio());
        }

        self.chat.reset();
        self.connecting = false;
        self.sync_dependants();
    }

    fn is_active_session(&self, session_id: i64) -> bool {
        return self.chat.session().map(|e| return e.id) == Some(session_id);
    }

    fn is_current_user(&self, user_id: i64) -> bool {
        return self.view.user.as_ref().map(|e| return e.id) == Some(user_id);
    }

    async fn remember_user(&mut self, user: &UserRecord) {
        if let Err(err) = self.store.save(user).await {
            tracing::error!(error = ?err, "Failed to save user");
        }
    }

    fn send(&mut self, text: &str, from_audio: bool) -> bool {
        match self.chat.begin_send(text, from_audio) {
            Ok(request) => {
                self.actions.push(Action::SendMessage(request));
                self.bubble_list.last();
                self.sync_dependants();
                return true;
            }
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "Send rejected");
                return false;
            }
        }
    }

    fn submit_textarea(&mut self) {
        let text = self.textarea.lines().join("\n");
        if self.send(&text, false) {
            self.textarea = TextArea::default();
        }
    }

    async fn activate_menu(&mut self) -> Result<()> {
        let action = match self.menu().into_iter().nth(self.menu_index) {
            Some(item) => item.action,
            None => return Ok(()),
        };

        match action {
            MenuAction::Navigate(nav) => self.navigate(nav).await?,
            MenuAction::ContinueAnonymous => self.actions.push(Action::ProvisionUser()),
            MenuAction::SelectPlan(plan_id) => {
                self.actions.push(Action::SelectPlan(plan_id.to_string()))
            }
        }

        return Ok(());
    }

    fn toggle_recording(&mut self) {
        if self.recording {
            let session_id = self.chat.session().map(|e| return e.id);
            self.actions.push(Action::StopRecording(session_id));
            return;
        }

        if self.chat.session().is_none() {
            tracing::debug!("Ignoring record request without a session");
            return;
        }

        self.actions.push(Action::StartRecording());
    }

    fn paste(&mut self, text: &str) {
        for char in text.chars() {
            if char == '\n' {
                self.textarea.insert_newline();
            } else {
                self.textarea.insert_char(char);
            }
        }
    }

    pub async fn handle_event(&mut self, event: Event) -> Result<()> {
        let in_chat = self.view.view == View::Chat;

        match event {
            Event::KeyboardCTRLC() => {
                self.should_quit = true;
            }
            Event::KeyboardEsc() => {
                self.navigate(NavAction::Back).await?;
            }
            Event::KeyboardEnter() => {
                if in_chat {
                    self.submit_textarea();
                } else {
                    self.activate_menu().await?;
                }
            }
            Event::KeyboardCharInput(input) => {
                if in_chat {
                    self.textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if in_chat {
                    self.paste(&text);
                }
            }
            Event::KeyboardCTRLR() => {
                if in_chat {
                    self.toggle_recording();
                }
            }
            Event::KeyboardCTRLP() => {
                if in_chat {
                    if let Some(url) = self.chat.last_audio_url() {
                        self.actions.push(Action::PlayAudio(url.to_string()));
                    }
                }
            }
            Event::KeyboardCTRLS() => {
                if self.now_playing.is_some() {
                    self.actions.push(Action::StopAudio());
                }
            }
            Event::UIScrollUp() => {
                if in_chat {
                    self.bubble_list.up(1);
                } else {
                    self.menu_index = self.menu_index.saturating_sub(1);
                }
            }
            Event::UIScrollDown() => {
                if in_chat {
                    self.bubble_list.down(1);
                } else {
                    let last = self.menu().len().saturating_sub(1);
                    self.menu_index = (self.menu_index + 1).min(last);
                }
            }
            Event::UIScrollPageUp() => {
                self.bubble_list.up(PAGE_LINES);
            }
            Event::UIScrollPageDown() => {
                self.bubble_list.down(PAGE_LINES);
            }
            Event::UITick() => (),
            Event::UserProvisioned(user) => {
                self.remember_user(&user).await;
                self.navigate(NavAction::Login(user)).await?;
            }
            Event::SessionStarted(ticket, user, session) => {
                if ticket == self.chat_ticket && in_chat && self.connecting {
                    // The chat identity is only kept when nothing is saved yet.
                    if self.view.user.is_none() {
                        self.remember_user(&user).await;
                        self.view.user = Some(user);
                    }

                    self.connecting = false;
                    self.chat.start(session);
                    self.bubble_list.last();
                    self.sync_dependants();
                } else {
                    tracing::debug!(
                        ticket,
                        session_id = session.id,
                        "Dropping session of a chat that was left"
                    );
                }
            }
            Event::BootstrapFailed(ticket) => {
                if ticket == self.chat_ticket {
                    self.connecting = false;
                }
            }
            Event::ChatSettled(session_id, outcome) => {
                if self.is_active_session(session_id) {
                    self.chat.complete_send(outcome);
                    self.sync_dependants();
                } else {
                    tracing::debug!(session_id, "Dropping reply for an inactive session");
                }
            }
            Event::Transcribed(session_id, text) => {
                if in_chat && self.is_active_session(session_id) {
                    self.send(&text, true);
                }
            }
            Event::DashboardLoaded(user_id, dashboard) => {
                if self.is_current_user(user_id) {
                    self.dashboard = Some(dashboard);
                }
            }
            Event::Notice(text) => {
                self.notice = Some(text);
            }
            Event::PlaybackChanged(now_playing) => {
                self.now_playing = now_playing;
            }
            Event::RecordingChanged(recording) => {
                self.recording = recording;
            }
        }

        return Ok(());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list.set_messages(
            self.chat.messages(),
            self.last_known_width.into(),
            self.last_known_height.into(),
        );
    }
}
