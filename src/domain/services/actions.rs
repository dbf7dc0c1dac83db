#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use super::audio::transcribe;
use super::bootstrap;
use super::chat::exchange;
use super::dashboard::load_dashboard;
use super::plans::select_plan;
use super::AudioAdapter;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::PaymentGatewayBox;

/// Runs network and audio work off the UI loop. Takes `Action`s in and reports
/// back with `Event`s.
pub struct ActionsService {
    backend: BackendBox,
    audio: AudioAdapter,
    payments: PaymentGatewayBox,
    tx: mpsc::UnboundedSender<Event>,
}

impl ActionsService {
    pub fn new(
        backend: BackendBox,
        audio: AudioAdapter,
        payments: PaymentGatewayBox,
        tx: mpsc::UnboundedSender<Event>,
    ) -> ActionsService {
        return ActionsService {
            backend,
            audio,
            payments,
            tx,
        };
    }

    pub async fn start(&mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        let mut playback_check = time::interval(time::Duration::from_millis(250));

        loop {
            tokio::select! {
                action = rx.recv() => {
                    match action {
                        Some(action) => self.handle(action).await?,
                        None => break,
                    }
                }
                _ = playback_check.tick() => {
                    if self.audio.poll_playback() {
                        self.tx.send(Event::PlaybackChanged(None))?;
                    }
                }
            }
        }

        self.audio.cancel_recording().await;
        self.audio.stop_playback().await?;

        return Ok(());
    }

    async fn handle(&mut self, action: Action) -> Result<()> {
        let worker_tx = self.tx.clone();
        let backend = self.backend.clone();

        match action {
            Action::ProvisionUser() => {
                tokio::spawn(async move {
                    match backend.create_anonymous_user().await {
                        Ok(user) => worker_tx.send(Event::UserProvisioned(user))?,
                        Err(err) => {
                            tracing::error!(error = ?err, "Failed to create anonymous user");
                            worker_tx.send(Event::Notice(
                                "Não foi possível criar o usuário anônimo.".to_string(),
                            ))?;
                        }
                    }

                    return Ok::<(), anyhow::Error>(());
                });
            }
            Action::StartSession(ticket, session_type, therapist) => {
                tokio::spawn(async move {
                    match bootstrap::provision(&backend, session_type, therapist).await {
                        Ok((user, session)) => {
                            worker_tx.send(Event::SessionStarted(ticket, user, session))?
                        }
                        Err(_) => worker_tx.send(Event::BootstrapFailed(ticket))?,
                    }

                    return Ok::<(), anyhow::Error>(());
                });
            }
            Action::SendMessage(request) => {
                tokio::spawn(async move {
                    let session_id = request.session_id;
                    let outcome = exchange(&backend, request).await;
                    worker_tx.send(Event::ChatSettled(session_id, outcome))?;

                    return Ok::<(), anyhow::Error>(());
                });
            }
            Action::StartRecording() => match self.audio.start_recording().await {
                Ok(_) => self.tx.send(Event::RecordingChanged(true))?,
                Err(err) => {
                    self.tx.send(Event::RecordingChanged(false))?;
                    self.tx.send(Event::Notice(err.to_string()))?;
                }
            },
            Action::StopRecording(session_id) => {
                let res = self.audio.stop_recording().await;
                self.tx.send(Event::RecordingChanged(false))?;

                match (res, session_id) {
                    (Ok(clip), Some(session_id)) => {
                        tokio::spawn(async move {
                            if let Some(text) = transcribe(&backend, session_id, clip).await {
                                worker_tx.send(Event::Transcribed(session_id, text))?;
                            }

                            return Ok::<(), anyhow::Error>(());
                        });
                    }
                    (Ok(_), None) => {
                        tracing::debug!("Dropping recording with no active session");
                    }
                    (Err(err), _) => {
                        tracing::error!(error = ?err, "Recording failed");
                    }
                }
            }
            Action::PlayAudio(path) => {
                let url = self.backend.resolve_audio_url(&path);
                match self.audio.play(&url).await {
                    Ok(_) => self.tx.send(Event::PlaybackChanged(Some(path)))?,
                    Err(err) => {
                        tracing::error!(error = ?err, url = url.as_str(), "Failed to play audio");
                        self.tx.send(Event::PlaybackChanged(None))?;
                        self.tx.send(Event::Notice(err.to_string()))?;
                    }
                }
            }
            Action::StopAudio() => {
                if let Err(err) = self.audio.stop_playback().await {
                    tracing::error!(error = ?err, "Failed to stop audio");
                }
                self.tx.send(Event::PlaybackChanged(None))?;
            }
            Action::LoadDashboard(user) => {
                tokio::spawn(async move {
                    let dashboard = load_dashboard(&backend, &user).await;
                    worker_tx.send(Event::DashboardLoaded(user.id, dashboard))?;

                    return Ok::<(), anyhow::Error>(());
                });
            }
            Action::SelectPlan(plan_id) => match select_plan(&self.payments, &plan_id).await {
                Ok(notice) => self.tx.send(Event::Notice(notice))?,
                Err(err) => {
                    tracing::error!(error = ?err, plan_id = plan_id.as_str(), "Failed to select plan");
                    self.tx.send(Event::Notice(err.to_string()))?;
                }
            },
        }

        return Ok(());
    }
}
