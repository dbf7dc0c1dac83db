pub mod command;
pub mod noop;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AudioPlayerBox;
use crate::domain::models::AudioRecorderBox;

fn is_disabled(command: &str) -> bool {
    let command = command.trim();
    return command.is_empty() || command == "none";
}

pub struct AudioManager {}

impl AudioManager {
    pub fn recorder_for(command: &str) -> AudioRecorderBox {
        if is_disabled(command) {
            return Box::<noop::NoopRecorder>::default();
        }

        return Box::new(command::CommandRecorder::new(command));
    }

    pub fn player_for(command: &str) -> AudioPlayerBox {
        if is_disabled(command) {
            return Box::<noop::NoopPlayer>::default();
        }

        return Box::new(command::CommandPlayer::new(command));
    }

    pub fn recorder() -> AudioRecorderBox {
        return AudioManager::recorder_for(&Config::get(ConfigKey::Recorder));
    }

    pub fn player() -> AudioPlayerBox {
        return AudioManager::player_for(&Config::get(ConfigKey::Player));
    }
}
