use crate::errors::{MurmurError, MurmurResult};
use async_trait::async_trait;
use copypasta::{ClipboardContext, ClipboardProvider};

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> MurmurResult<()>;
}

/// The platform clipboard. The context is opened per write on a blocking
/// thread; platforms without a clipboard fail every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> MurmurResult<()> {
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut ctx = ClipboardContext::new()
                .map_err(|e| MurmurError::clipboard_error(format!("Failed to access clipboard: {}", e)))?;
            ctx.set_contents(text)
                .map_err(|e| MurmurError::clipboard_error(e.to_string()))
        })
        .await
        .map_err(|e| MurmurError::clipboard_error(e.to_string()))?
    }
}
