#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Margin;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::ScrollbarState;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Delivery;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::Therapist;
use crate::domain::models::TherapistId;
use crate::domain::models::ThemeColor;

const USER_AUTHOR: &str = "Você";

pub fn theme_color(color: ThemeColor) -> Color {
    match color {
        ThemeColor::Purple => return Color::Magenta,
        ThemeColor::Blue => return Color::Blue,
        ThemeColor::Indigo => return Color::Rgb(99, 102, 241),
    }
}

struct BubbleCacheEntry {
    text_len: usize,
    delivery: Delivery,
    lines: Vec<Line<'static>>,
}

/// Rendered chat bubbles plus the scroll position over them. Sticks to the
/// newest message until the user scrolls up.
pub struct BubbleList {
    cache: HashMap<usize, BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
    viewport_height: usize,
    position: usize,
    follow: bool,
    therapist: &'static Therapist,
}

impl Default for BubbleList {
    fn default() -> BubbleList {
        return BubbleList::new(Therapist::get(TherapistId::Psicologo));
    }
}

impl BubbleList {
    pub fn new(therapist: &'static Therapist) -> BubbleList {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
            viewport_height: 0,
            position: 0,
            follow: true,
            therapist,
        };
    }

    pub fn set_therapist(&mut self, therapist: &'static Therapist) {
        self.therapist = therapist;
        self.cache.clear();
        self.follow = true;
    }

    pub fn set_messages(
        &mut self,
        messages: &[Message],
        line_width: usize,
        viewport_height: usize,
    ) {
        if self.line_width != line_width || messages.len() < self.cache.len() {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.viewport_height = viewport_height;

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(entry) = self.cache.get(&idx) {
                    if entry.text_len == message.text.len() && entry.delivery == message.delivery()
                    {
                        return entry.lines.len();
                    }
                }

                let lines = self.bubble_lines(message, line_width);
                let lines_len = lines.len();
                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        text_len: message.text.len(),
                        delivery: message.delivery(),
                        lines,
                    },
                );

                return lines_len;
            })
            .sum();

        if self.follow {
            self.position = self.max_position();
        } else {
            self.position = self.position.min(self.max_position());
        }
    }

    fn bubble_lines(&self, message: &Message, line_width: usize) -> Vec<Line<'static>> {
        if message.sender == Sender::User {
            return Bubble::new(
                message,
                BubbleAlignment::Right,
                USER_AUTHOR,
                Color::Gray,
                line_width,
            )
            .as_lines();
        }

        return Bubble::new(
            message,
            BubbleAlignment::Left,
            self.therapist.name,
            theme_color(self.therapist.color),
            line_width,
        )
        .as_lines();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn position(&self) -> usize {
        return self.position;
    }

    fn max_position(&self) -> usize {
        return self.lines_len.saturating_sub(self.viewport_height);
    }

    pub fn up(&mut self, lines: usize) {
        self.position = self.position.saturating_sub(lines);
        self.follow = self.position == self.max_position();
    }

    pub fn down(&mut self, lines: usize) {
        self.position = self.position.saturating_add(lines).min(self.max_position());
        self.follow = self.position == self.max_position();
    }

    pub fn last(&mut self) {
        self.follow = true;
        self.position = self.max_position();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();

        let position = u16::try_from(self.position).unwrap_or(u16::MAX);
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((position, 0)),
            rect,
        );

        let mut scrollbar_state = ScrollbarState::default()
            .content_length(u16::try_from(self.lines_len).unwrap_or(u16::MAX))
            .viewport_content_length(rect.height)
            .position(position);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            rect.inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}
