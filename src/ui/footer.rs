use crate::widget::ChatWidget;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn instructions(voice_visible: bool) -> &'static str {
    if voice_visible {
        "Enter send · Ctrl+R speak · ↑/↓ pick reply · Ctrl+Y copy · PgUp/PgDn scroll · Esc quit"
    } else {
        "Enter send · ↑/↓ pick reply · Ctrl+Y copy · PgUp/PgDn scroll · Esc quit"
    }
}

pub fn draw_footer(f: &mut Frame<'_>, area: Rect, widget: &ChatWidget) {
    let footer = Paragraph::new(instructions(widget.voice_visible()))
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
