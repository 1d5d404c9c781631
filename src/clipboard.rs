use crate::error::{CodeclipError, Result};

/// Destination for the assembled text, so callers can swap in a mock
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard implementation using arboard
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard =
            arboard::Clipboard::new().map_err(|e| CodeclipError::ClipboardError(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| CodeclipError::ClipboardError(e.to_string()))
    }
}

/// Copy text to the system clipboard, returning the number of bytes copied
pub fn copy_to_clipboard(text: &str) -> Result<usize> {
    let mut clipboard = SystemClipboard::new()?;
    deliver(&mut clipboard, text)
}

/// Hand `text` to any clipboard sink, returning the number of bytes delivered.
pub fn deliver<C: Clipboard + ?Sized>(clipboard: &mut C, text: &str) -> Result<usize> {
    clipboard.set_text(text)?;
    Ok(text.len())
}
