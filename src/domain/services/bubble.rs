#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Delivery;
use crate::domain::models::Message;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    author: &'a str,
    color: Color,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn width(text: &str) -> usize {
    return text.chars().count();
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        author: &'a str,
        color: Color,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            author,
            color,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    /// Status line under the text: voice input, available audio and delivery.
    pub fn footer(&self) -> Option<String> {
        let mut markers = vec![];
        if self.message.transcribed {
            markers.push("voz");
        }
        if self.message.has_audio() {
            markers.push("♪ Ctrl+P");
        }
        match self.message.delivery() {
            Delivery::Pending => markers.push("enviando..."),
            Delivery::Failed => markers.push("não enviado"),
            Delivery::Confirmed => (),
        }

        if markers.is_empty() {
            return None;
        }

        return Some(markers.join(" · "));
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let text_lines = self.message.as_string_lines(self.max_text_width());
        let footer = self.footer();

        let mut max_line_length = text_lines
            .iter()
            .chain(footer.iter())
            .map(|line| return width(line))
            .max()
            .unwrap_or(0);
        max_line_length = max_line_length.max(width(self.author));

        let mut lines = vec![self.border_line(self.top_bar(max_line_length), max_line_length)];
        for text in text_lines {
            lines.push(self.text_line(text, Style::default(), max_line_length));
        }
        if let Some(footer) = footer {
            let style = Style {
                fg: Some(Color::DarkGray),
                ..Style::default()
            };
            lines.push(self.text_line(footer, style, max_line_length));
        }
        let bottom_bar = format!("╰{}╯", "─".repeat(max_line_length + 2));
        lines.push(self.border_line(bottom_bar, max_line_length));

        return lines;
    }

    fn max_text_width(&self) -> usize {
        let style_config = Bubble::style_config();
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        return self
            .window_max_width
            .saturating_sub(style_config.border_elements_length + min_bubble_padding_length)
            .max(1);
    }

    fn outer_padding(&self, max_line_length: usize) -> String {
        // Bubble borders, inner padding and the scrollbar column.
        let used = max_line_length + 4 + 1;
        return " ".repeat(self.window_max_width.saturating_sub(used));
    }

    fn top_bar(&self, max_line_length: usize) -> String {
        let fill = "─".repeat(max_line_length + 2 - width(self.author));
        return format!("╭{}{fill}╮", self.author);
    }

    fn border_style(&self) -> Style {
        let mut fg = self.color;
        if self.message.delivery() == Delivery::Failed {
            fg = Color::Red;
        }

        return Style {
            fg: Some(fg),
            ..Style::default()
        };
    }

    fn text_line(&self, text: String, style: Style, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length - width(&text));
        let spans = vec![
            Span::styled("│ ".to_string(), self.border_style()),
            Span::styled(text, style),
            Span::styled(format!("{fill} │"), self.border_style()),
        ];

        return self.align(spans, max_line_length);
    }

    fn border_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        return self.align(
            vec![Span::styled(text, self.border_style())],
            max_line_length,
        );
    }

    fn align(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let padding = Span::from(self.outer_padding(max_line_length));
        if self.alignment == BubbleAlignment::Left {
            spans.push(padding);
            return Line::from(spans);
        }

        let mut line_spans = vec![padding];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }
}
