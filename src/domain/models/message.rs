#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ChatReply;

pub const FALLBACK_REPLY: &str = "Desculpe, ocorreu um erro. Tente novamente.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// Delivery status of a message. User messages start out `Pending` and are
/// settled exactly once, AI messages are always `Confirmed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
    pub transcribed: bool,
    pub audio_url: Option<String>,
    delivery: Delivery,
}

fn now() -> String {
    return Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
}

impl Message {
    pub fn user(text: &str, transcribed: bool) -> Message {
        return Message {
            id: Uuid::new_v4().to_string(),
            sender: Sender::User,
            text: text.to_string(),
            timestamp: now(),
            transcribed,
            audio_url: None,
            delivery: Delivery::Pending,
        };
    }

    pub fn ai(text: &str) -> Message {
        return Message {
            id: Uuid::new_v4().to_string(),
            sender: Sender::Ai,
            text: text.to_string(),
            timestamp: now(),
            transcribed: false,
            audio_url: None,
            delivery: Delivery::Confirmed,
        };
    }

    pub fn fallback() -> Message {
        return Message::ai(FALLBACK_REPLY);
    }

    pub fn from_reply(reply: ChatReply) -> Message {
        let mut msg = Message::ai(&reply.message);
        if let Some(message_id) = reply.message_id {
            msg.id = message_id.to_string();
        }
        if let Some(timestamp) = reply.timestamp {
            msg.timestamp = timestamp;
        }
        if reply.has_audio {
            msg.audio_url = reply.audio_url;
        }

        return msg;
    }

    pub fn delivery(&self) -> Delivery {
        return self.delivery;
    }

    pub fn has_audio(&self) -> bool {
        return self.audio_url.is_some();
    }

    /// Settles a pending message. Returns false when it was already settled.
    pub fn settle(&mut self, delivered: bool) -> bool {
        if self.delivery != Delivery::Pending {
            return false;
        }

        if delivered {
            self.delivery = Delivery::Confirmed;
        } else {
            self.delivery = Delivery::Failed;
        }

        return true;
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if word_len + char_count + 1 > line_max_width && !current_lines.is_empty() {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
