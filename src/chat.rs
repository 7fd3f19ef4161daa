use crate::models::{CopyGlyph, DisplayedMessage, Sender};

/// The text input the user types into.
#[derive(Debug, Default, Clone)]
pub struct InputField {
    value: String,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// The scrollable display container. Messages are only ever appended.
#[derive(Debug, Default)]
pub struct MessageList {
    messages: Vec<DisplayedMessage>,
    scroll: u16,
    pinned: bool,
    selected: Option<usize>,
}

impl MessageList {
    pub fn push(&mut self, message: DisplayedMessage) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }

    pub fn messages(&self) -> &[DisplayedMessage] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&DisplayedMessage> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Text of the bot message at `index`, if that is a bot message.
    pub fn bot_text(&self, index: usize) -> Option<String> {
        self.messages
            .get(index)
            .filter(|m| m.is_bot())
            .map(|m| m.text.clone())
    }

    pub fn set_copy_glyph(&mut self, index: usize, glyph: CopyGlyph) {
        if let Some(control) = self.messages.get_mut(index).and_then(|m| m.copy.as_mut()) {
            control.glyph = glyph;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.pinned = true;
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.pinned = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    /// Clamps the offset against the rendered height; reaching the bottom
    /// pins the view again.
    pub fn resolve_scroll(&mut self, max_scroll: u16) -> u16 {
        if self.pinned || self.scroll >= max_scroll {
            self.scroll = max_scroll;
            self.pinned = true;
        }
        self.scroll
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Explicit selection, else the newest bot message.
    pub fn copy_target(&self) -> Option<usize> {
        self.selected.or_else(|| self.bot_indices().last())
    }

    pub fn select_previous_bot(&mut self) {
        let current = self.selected.unwrap_or(self.messages.len());
        let previous = self.bot_indices().filter(|&i| i < current).last();
        if previous.is_some() {
            self.selected = previous;
        }
    }

    /// Moving past the newest bot message clears the selection.
    pub fn select_next_bot(&mut self) {
        let Some(current) = self.selected else {
            return;
        };
        let next = self.bot_indices().find(|&i| i > current);
        self.selected = next;
    }

    fn bot_indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.sender == Sender::Bot)
            .map(|(i, _)| i)
    }
}
