#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use strum::EnumIter;

use super::SessionTypeId;
use super::TherapistId;
use super::UserRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum View {
    Landing,
    SessionType,
    TherapistSelection,
    Chat,
    Pricing,
    Dashboard,
}

impl View {
    /// Where "back" goes from this view. Fixed, independent of how the view
    /// was reached.
    pub fn predecessor(&self) -> View {
        match self {
            View::Chat => return View::TherapistSelection,
            View::TherapistSelection => return View::SessionType,
            View::SessionType => return View::Landing,
            View::Pricing | View::Dashboard | View::Landing => return View::Landing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    StartChat,
    SelectSessionType(SessionTypeId),
    SelectTherapist(TherapistId),
    Back,
    ShowPricing,
    ShowDashboard,
    Login(UserRecord),
    Logout,
    Upgrade,
}

/// Which screen is shown plus the selections carried between screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub view: View,
    pub session_type: Option<SessionTypeId>,
    pub therapist: Option<TherapistId>,
    pub user: Option<UserRecord>,
}

impl Default for ViewState {
    fn default() -> ViewState {
        return ViewState {
            view: View::Landing,
            session_type: None,
            therapist: None,
            user: None,
        };
    }
}

impl ViewState {
    pub fn with_user(user: Option<UserRecord>) -> ViewState {
        return ViewState {
            user,
            ..ViewState::default()
        };
    }

    pub fn transition(self, action: NavAction) -> ViewState {
        let mut next = self;
        match action {
            NavAction::StartChat => {
                next.view = View::SessionType;
            }
            NavAction::SelectSessionType(session_type) => {
                next.session_type = Some(session_type);
                next.view = View::TherapistSelection;
            }
            NavAction::SelectTherapist(therapist) => {
                next.therapist = Some(therapist);
                next.view = View::Chat;
            }
            NavAction::Back => {
                next.view = next.view.predecessor();
            }
            NavAction::ShowPricing | NavAction::Upgrade => {
                next.view = View::Pricing;
            }
            NavAction::ShowDashboard => {
                next.view = View::Dashboard;
            }
            NavAction::Login(user) => {
                next.user = Some(user);
                next.view = View::Dashboard;
            }
            NavAction::Logout => {
                next.user = None;
                next.view = View::Landing;
            }
        }

        return next;
    }

    pub fn needs_login(&self) -> bool {
        return self.view == View::Dashboard && self.user.is_none();
    }

    /// Both selections needed to open a chat, if made.
    pub fn chat_selection(&self) -> Option<(SessionTypeId, TherapistId)> {
        if let (Some(session_type), Some(therapist)) = (self.session_type, self.therapist) {
            return Some((session_type, therapist));
        }

        return None;
    }
}
