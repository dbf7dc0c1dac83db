mod action;
mod audio;
mod backend;
mod catalog;
mod event;
mod loading;
mod message;
mod payment;
mod session;
mod textarea;
mod user;
mod view;

pub use action::*;
pub use audio::*;
pub use backend::*;
pub use catalog::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use payment::*;
pub use session::*;
pub use textarea::*;
pub use user::*;
pub use view::*;
