use tui_textarea::Input;

use super::ChatOutcome;
use super::Dashboard;
use super::Session;
use super::UserRecord;

#[derive(Debug)]
pub enum Event {
    BootstrapFailed(u64),
    /// Outcome of a send, tagged with the session it was sent in.
    ChatSettled(i64, ChatOutcome),
    /// Dashboard of the user with the given id.
    DashboardLoaded(i64, Dashboard),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLP(),
    KeyboardCTRLR(),
    KeyboardCTRLS(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    Notice(String),
    PlaybackChanged(Option<String>),
    RecordingChanged(bool),
    SessionStarted(u64, UserRecord, Session),
    /// Transcript of a recording made in the given session.
    Transcribed(i64, String),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
    UserProvisioned(UserRecord),
}
