pub mod actions;
mod app_state;
mod audio;
pub mod bootstrap;
mod bubble;
mod bubble_list;
mod chat;
pub mod dashboard;
pub mod events;
pub mod plans;
mod users;

pub use app_state::*;
pub use audio::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat::*;
pub use users::*;
