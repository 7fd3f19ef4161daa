//! The chat widget: input field, send control, message list and the optional
//! voice control.
//!
//! Widget state is only mutated on the event loop. Network calls, clipboard
//! writes, speech sessions and glyph timers run as spawned tasks and report
//! back as [`WidgetEvent`]s, which the loop feeds to
//! [`ChatWidget::handle_event`]. Nothing is serialized: two submits in flight
//! render their replies in completion order, and overlapping copy timers each
//! reset the glyph when they fire.

use crate::{
    api::{exchange, ChatTransport},
    chat::{InputField, MessageList},
    clipboard::ClipboardWriter,
    constants::COPY_FEEDBACK,
    models::{CopyGlyph, DisplayedMessage, OutboundMessage, Sender},
    speech::VoiceInput,
};
use log::error;
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Completions of asynchronous work, delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Bot text for a finished exchange, fallbacks already applied.
    Reply(String),
    CopyFinished { index: usize, copied: bool },
    CopyReverted { index: usize },
    Transcript(String),
}

pub struct ChatWidget {
    input: InputField,
    display: MessageList,
    voice: VoiceInput,
    transport: Arc<dyn ChatTransport>,
    clipboard: Arc<dyn ClipboardWriter>,
    locale: String,
    copy_feedback: Duration,
    events: UnboundedSender<WidgetEvent>,
}

impl ChatWidget {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        clipboard: Arc<dyn ClipboardWriter>,
        voice: VoiceInput,
        locale: impl Into<String>,
    ) -> (Self, UnboundedReceiver<WidgetEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let widget = Self {
            input: InputField::default(),
            display: MessageList::default(),
            voice,
            transport,
            clipboard,
            locale: locale.into(),
            copy_feedback: COPY_FEEDBACK,
            events,
        };
        (widget, receiver)
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    pub fn messages(&self) -> &MessageList {
        &self.display
    }

    pub fn messages_mut(&mut self) -> &mut MessageList {
        &mut self.display
    }

    /// The voice control is only shown when recognition is available.
    pub fn voice_visible(&self) -> bool {
        self.voice.is_available()
    }

    /// Send control: submits whatever is in the input field.
    pub fn send(&mut self) -> bool {
        let text = self.input.value().to_string();
        self.submit(&text)
    }

    /// Returns `false` when the trimmed text is empty; nothing happens then.
    pub fn submit(&mut self, text: &str) -> bool {
        let Some(message) = OutboundMessage::new(text) else {
            return false;
        };

        self.render_message(Sender::User, message.text());
        self.input.clear();
        self.send_to_server(message);
        true
    }

    fn send_to_server(&self, message: OutboundMessage) {
        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        tokio::spawn(async move {
            let text = exchange(transport.as_ref(), &message).await;
            let _ = events.send(WidgetEvent::Reply(text));
        });
    }

    pub fn render_message(&mut self, sender: Sender, text: &str) {
        self.display.push(DisplayedMessage::new(sender, text));
    }

    /// Copy control of the bot message at `index`. Returns `false` if there
    /// is no bot message there.
    pub fn copy_to_clipboard(&self, index: usize) -> bool {
        let Some(text) = self.display.bot_text(index) else {
            return false;
        };

        let clipboard = Arc::clone(&self.clipboard);
        let events = self.events.clone();
        let feedback = self.copy_feedback;
        tokio::spawn(async move {
            let copied = clipboard.write_text(&text).await.is_ok();
            let _ = events.send(WidgetEvent::CopyFinished { index, copied });
            tokio::time::sleep(feedback).await;
            let _ = events.send(WidgetEvent::CopyReverted { index });
        });
        true
    }

    pub fn copy_selected(&self) -> bool {
        match self.display.copy_target() {
            Some(index) => self.copy_to_clipboard(index),
            None => false,
        }
    }

    /// Voice control: starts one recognition session. Inert when voice input
    /// is unavailable.
    pub fn activate_voice(&self) -> bool {
        let VoiceInput::Available(recognizer) = &self.voice else {
            return false;
        };

        let recognizer = Arc::clone(recognizer);
        let locale = self.locale.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            match recognizer.recognize_once(&locale).await {
                Ok(transcript) => {
                    let _ = events.send(WidgetEvent::Transcript(transcript));
                }
                Err(e) => error!("Speech recognition error: {}", e),
            }
        });
        true
    }

    pub fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Reply(text) => self.render_message(Sender::Bot, &text),
            WidgetEvent::CopyFinished { index, copied } => {
                let glyph = if copied {
                    CopyGlyph::Copied
                } else {
                    CopyGlyph::Failed
                };
                self.display.set_copy_glyph(index, glyph);
            }
            WidgetEvent::CopyReverted { index } => {
                self.display.set_copy_glyph(index, CopyGlyph::Idle);
            }
            WidgetEvent::Transcript(transcript) => {
                self.input.set(transcript);
                self.send();
            }
        }
    }
}
