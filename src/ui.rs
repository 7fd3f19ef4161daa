// src/ui.rs

pub mod chat;
pub mod footer;

use crate::widget::ChatWidget;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn draw(f: &mut Frame, widget: &mut ChatWidget) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    chat::draw_messages(f, widget, chunks[0]);
    chat::draw_controls(f, widget, chunks[1]);
    chat::draw_input(f, widget, chunks[2]);
    footer::draw_footer(f, chunks[3], widget);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ChatTransport,
        clipboard::ClipboardWriter,
        errors::{MurmurError, MurmurResult},
        models::{ChatReply, OutboundMessage, Sender},
        speech::{SpeechRecognizer, VoiceInput},
    };
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct Nothing;

    #[async_trait]
    impl ChatTransport for Nothing {
        async fn send(&self, _message: &OutboundMessage) -> MurmurResult<ChatReply> {
            Err(MurmurError::api_error("unused"))
        }
    }

    #[async_trait]
    impl ClipboardWriter for Nothing {
        async fn write_text(&self, _text: &str) -> MurmurResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl SpeechRecognizer for Nothing {
        async fn recognize_once(&self, _locale: &str) -> MurmurResult<String> {
            Err(MurmurError::speech_error("unused"))
        }
    }

    fn screen(widget: &mut ChatWidget) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, widget)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_voice_control_hidden_when_unavailable() {
        let (mut widget, _events) =
            ChatWidget::new(Arc::new(Nothing), Arc::new(Nothing), VoiceInput::Unavailable, "en-US");
        let rendered = screen(&mut widget);

        assert!(rendered.contains("Send"));
        assert!(!rendered.contains("Voice"));
    }

    #[test]
    fn test_voice_control_shown_when_available() {
        let voice = VoiceInput::Available(Arc::new(Nothing));
        let (mut widget, _events) =
            ChatWidget::new(Arc::new(Nothing), Arc::new(Nothing), voice, "en-US");
        let rendered = screen(&mut widget);

        assert!(rendered.contains("Voice"));
    }

    #[test]
    fn test_huge_input_draws_without_overflow() {
        let (mut widget, _events) =
            ChatWidget::new(Arc::new(Nothing), Arc::new(Nothing), VoiceInput::Unavailable, "en-US");
        widget.input_mut().set("a".repeat(70_000));

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, &mut widget)).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80);
    }

    #[test]
    fn test_newest_message_stays_visible() {
        let (mut widget, _events) =
            ChatWidget::new(Arc::new(Nothing), Arc::new(Nothing), VoiceInput::Unavailable, "en-US");
        for i in 0..20 {
            widget.render_message(Sender::User, &format!("question{}", i));
        }
        widget.render_message(Sender::Bot, "finalanswer");

        let rendered = screen(&mut widget);

        assert!(rendered.contains("finalanswer"));
        assert!(!rendered.contains("question0"));
    }
}
