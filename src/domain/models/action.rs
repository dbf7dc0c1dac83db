use super::ChatRequest;
use super::SessionTypeId;
use super::TherapistId;
use super::UserRecord;

/// Work requested by the UI from the background actions worker.
#[derive(Debug)]
pub enum Action {
    ProvisionUser(),
    /// Bootstraps a chat. The ticket comes back on the resulting event so
    /// replies for a chat the user already left can be told apart.
    StartSession(u64, SessionTypeId, TherapistId),
    SendMessage(ChatRequest),
    StartRecording(),
    /// Stops the recorder. The clip is transcribed against the given session,
    /// or dropped when there is none.
    StopRecording(Option<i64>),
    PlayAudio(String),
    StopAudio(),
    LoadDashboard(UserRecord),
    SelectPlan(String),
}
