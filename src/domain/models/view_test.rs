use strum::IntoEnumIterator;

use super::NavAction;
use super::View;
use super::ViewState;
use crate::domain::models::SessionTypeId;
use crate::domain::models::TherapistId;
use crate::domain::models::UserRecord;

fn state_at(view: View) -> ViewState {
    return ViewState {
        view,
        ..ViewState::default()
    };
}

#[test]
fn it_starts_on_landing() {
    let state = ViewState::default();
    assert_eq!(state.view, View::Landing);
    assert!(state.user.is_none());
}

#[test]
fn it_walks_to_chat() {
    let state = ViewState::default()
        .transition(NavAction::StartChat)
        .transition(NavAction::SelectSessionType(SessionTypeId::Autoestima))
        .transition(NavAction::SelectTherapist(TherapistId::Psicologo));

    assert_eq!(state.view, View::Chat);
    assert_eq!(
        state.chat_selection(),
        Some((SessionTypeId::Autoestima, TherapistId::Psicologo))
    );
}

#[test]
fn it_goes_back_to_fixed_predecessors() {
    let expected = vec![
        (View::Landing, View::Landing),
        (View::SessionType, View::Landing),
        (View::TherapistSelection, View::SessionType),
        (View::Chat, View::TherapistSelection),
        (View::Pricing, View::Landing),
        (View::Dashboard, View::Landing),
    ];

    for (from, to) in expected {
        assert_eq!(state_at(from).transition(NavAction::Back).view, to);
    }
}

#[test]
fn it_goes_back_regardless_of_history() {
    for view in View::iter() {
        let mut deep = ViewState::default();
        for _ in 0..5 {
            deep = deep
                .transition(NavAction::ShowPricing)
                .transition(NavAction::ShowDashboard)
                .transition(NavAction::StartChat)
                .transition(NavAction::SelectSessionType(SessionTypeId::Carreira))
                .transition(NavAction::SelectTherapist(TherapistId::Coach));
        }
        deep.view = view;

        let shallow = state_at(view).transition(NavAction::Back);
        assert_eq!(deep.transition(NavAction::Back).view, shallow.view);
    }
}

#[test]
fn it_keeps_selections_when_going_back() {
    let state = ViewState::default()
        .transition(NavAction::SelectSessionType(SessionTypeId::Carreira))
        .transition(NavAction::SelectTherapist(TherapistId::Coach))
        .transition(NavAction::Back);

    assert_eq!(state.view, View::TherapistSelection);
    assert_eq!(state.session_type, Some(SessionTypeId::Carreira));
    assert_eq!(state.therapist, Some(TherapistId::Coach));
}

#[test]
fn it_requires_login_on_dashboard() {
    let state = ViewState::default().transition(NavAction::ShowDashboard);
    assert!(state.needs_login());

    let state = state.transition(NavAction::Login(UserRecord::anonymous(7, 3)));
    assert_eq!(state.view, View::Dashboard);
    assert!(!state.needs_login());

    let state = state.transition(NavAction::Logout);
    assert_eq!(state.view, View::Landing);
    assert!(state.user.is_none());
}

#[test]
fn it_upgrades_to_pricing() {
    let state = ViewState::with_user(Some(UserRecord::anonymous(7, 3)))
        .transition(NavAction::ShowDashboard)
        .transition(NavAction::Upgrade);

    assert_eq!(state.view, View::Pricing);
    assert!(state.user.is_some());
}

#[test]
fn it_names_views() {
    assert_eq!(View::TherapistSelection.to_string(), "therapistSelection");
    assert_eq!(View::SessionType.to_string(), "sessionType");
}
