use std::time::Duration;

// Endpoint
pub const CHAT_PATH: &str = "/chat";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

// Fallback texts shown as bot messages
pub const NO_RESPONSE_FALLBACK: &str = "No response received.";
pub const FAILURE_FALLBACK: &str = "Sorry, something went wrong.";

// Copy control glyphs
pub const COPY_GLYPH: &str = "📋";
pub const COPIED_GLYPH: &str = "✔";
pub const COPY_FAILED_GLYPH: &str = "❌";
pub const COPY_FEEDBACK: Duration = Duration::from_millis(1000);

// Voice input
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_SPEECH_COMMAND: &str = "murmur-listen";

// Relay
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
pub const DEFAULT_RELAY_BIND: &str = "0.0.0.0:5000";
pub const EMPTY_MESSAGE_ERROR: &str = "Please enter a message!";
pub const RELAY_EMPTY_TEXT: &str = "No response received from API.";
pub const RELAY_NO_CANDIDATE: &str = "No valid response from API.";
pub const RELAY_NO_TEXT: &str = "No valid response.";
pub const RELAY_PROCESSING_ERROR: &str = "Error processing response.";
