use crate::errors::{MurmurError, MurmurResult};
use async_trait::async_trait;
use log::info;
use std::{path::PathBuf, process::Stdio, sync::Arc};
use tokio::process::Command;

/// A single-shot recognizer: one activation yields at most one transcript.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize_once(&self, locale: &str) -> MurmurResult<String>;
}

/// Voice input source, picked once when the widget is built.
#[derive(Clone)]
pub enum VoiceInput {
    Available(Arc<dyn SpeechRecognizer>),
    Unavailable,
}

impl VoiceInput {
    /// Voice input is available when the recognizer command resolves on PATH.
    pub fn detect(command: &str) -> Self {
        match which::which(command) {
            Ok(path) => {
                info!("Speech recognition via {}", path.display());
                VoiceInput::Available(Arc::new(CommandRecognizer::new(path)))
            }
            Err(_) => {
                info!("Speech recognizer '{}' not found; voice input hidden", command);
                VoiceInput::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, VoiceInput::Available(_))
    }
}

impl std::fmt::Debug for VoiceInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceInput::Available(_) => f.write_str("VoiceInput::Available"),
            VoiceInput::Unavailable => f.write_str("VoiceInput::Unavailable"),
        }
    }
}

/// Runs `<program> --lang <locale> --single-shot` and takes the first
/// non-empty stdout line as the transcript.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: PathBuf,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize_once(&self, locale: &str) -> MurmurResult<String> {
        let output = Command::new(&self.program)
            .args(["--lang", locale, "--single-shot"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                MurmurError::speech_error(format!("Failed to run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MurmurError::speech_error(format!(
                "recognizer exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| MurmurError::speech_error("no transcript produced"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_missing_command_is_unavailable() {
        let voice = VoiceInput::detect("murmur-listen-definitely-not-installed");
        assert!(!voice.is_available());
    }

    #[cfg(unix)]
    fn script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("listen.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_first_line_is_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo\necho \"turn on the lights $2\"\necho \"second\"");

        let transcript = CommandRecognizer::new(program)
            .recognize_once("en-US")
            .await
            .unwrap();

        assert_eq!(transcript, "turn on the lights en-US");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_recognizer_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo 'no microphone' >&2\nexit 3");

        let result = CommandRecognizer::new(program).recognize_once("en-US").await;

        assert!(matches!(result, Err(MurmurError::Speech(msg)) if msg.contains("no microphone")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_silent_recognizer_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "exit 0");

        let result = CommandRecognizer::new(program).recognize_once("en-US").await;

        assert!(matches!(result, Err(MurmurError::Speech(_))));
    }
}
