use crate::models::{DisplayedMessage, Sender};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Turns a [`DisplayedMessage`] into terminal lines.
pub struct MessageView<'a> {
    message: &'a DisplayedMessage,
    selected: bool,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a DisplayedMessage, selected: bool) -> Self {
        Self { message, selected }
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, area, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn indent(&self) -> &'static str {
        match self.message.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn base_style(&self) -> Style {
        let style = Style::default().fg(match self.message.sender {
            Sender::User => Color::Rgb(255, 223, 128),
            Sender::Bot => Color::Rgb(144, 238, 144),
        });

        if self.selected {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.message.timestamp.format("%H:%M").to_string();
        let label = match self.message.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };

        let mut spans = vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(format!(" {} ", label), style),
        ];

        if let Some(copy) = &self.message.copy {
            let control_style = if self.selected {
                Style::default().fg(Color::Black).bg(Color::Rgb(144, 238, 144))
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!("[{}]", copy.glyph.as_str()), control_style));
        }

        lines.push(Line::from(spans));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize)
            .saturating_sub(4 + self.indent().len())
            .max(1);

        for segment in split_fences(&self.message.text) {
            match segment {
                Segment::Prose(rows) => {
                    for row in wrap(&rows.join("\n"), wrap_width) {
                        lines.push(self.body_line(style, [Span::styled(row.into_owned(), style)]));
                    }
                }
                Segment::Code(rows) => {
                    for row in rows {
                        lines.push(self.body_line(
                            style,
                            [
                                Span::styled("▎", Style::default().fg(Color::DarkGray)),
                                Span::styled(format!(" {}", row), code_style()),
                            ],
                        ));
                    }
                }
            }
        }
    }

    /// Prefixes `content` with the indent and the left rule of the bubble.
    fn body_line<const N: usize>(&self, style: Style, content: [Span<'static>; N]) -> Line<'static> {
        let mut spans = vec![Span::styled(self.indent(), style), Span::styled("│ ", style)];
        spans.extend(content);
        Line::from(spans)
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}

/// A run of message lines, either plain prose or the inside of a ``` fence.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'t> {
    Prose(Vec<&'t str>),
    Code(Vec<&'t str>),
}

/// Splits on fence lines. The fence lines themselves are dropped, and an
/// unclosed fence runs to the end of the text.
fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rows = Vec::new();
    let mut fenced = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            push_segment(&mut segments, std::mem::take(&mut rows), fenced);
            fenced = !fenced;
        } else {
            rows.push(line);
        }
    }
    push_segment(&mut segments, rows, fenced);

    segments
}

fn push_segment<'t>(segments: &mut Vec<Segment<'t>>, rows: Vec<&'t str>, fenced: bool) {
    if rows.is_empty() {
        return;
    }
    segments.push(if fenced {
        Segment::Code(rows)
    } else {
        Segment::Prose(rows)
    });
}

fn code_style() -> Style {
    Style::default()
        .fg(Color::Rgb(209, 154, 102))
        .add_modifier(Modifier::BOLD)
}
