use crate::chat_message::MessageView;
use crate::widget::ChatWidget;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_messages(f: &mut Frame, widget: &mut ChatWidget, area: Rect) {
    let selected = widget.messages().selected();
    let mut lines = Vec::new();
    for (idx, message) in widget.messages().messages().iter().enumerate() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(MessageView::new(message, selected == Some(idx)).render(area));
    }

    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(area.height);
    let scroll = widget.messages_mut().resolve_scroll(max_scroll);

    let msgs_para = Paragraph::new(lines).block(Block::default());
    f.render_widget(msgs_para.scroll((scroll, 0)), area);
}

/// Send and voice controls. The voice control is left out entirely when
/// speech recognition is unavailable.
pub fn draw_controls(f: &mut Frame, widget: &ChatWidget, area: Rect) {
    let control = Style::default().fg(Color::Black).bg(Color::Rgb(144, 238, 144));
    let mut spans = vec![Span::styled(" Send ⏎ ", control)];
    if widget.voice_visible() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(" 🎤 Voice ^R ", control));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn draw_input(f: &mut Frame, widget: &ChatWidget, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            height: 1,
            ..area
        },
    );

    let value = widget.input().value();
    let input = Line::from(vec![
        Span::styled("→ ", Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = u16::try_from(value.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        },
    );

    // the cursor never sits past the visible part of the line
    let cursor_x = area.x.saturating_add(2).saturating_add(text_width.min(visible_width));
    f.set_cursor_position((cursor_x, area.y + 1));
}
