use std::io;

use async_trait::async_trait;

/// Supplies the text to analyze.
///
/// Acquisition may be slow (file or network backed); the engine runs it
/// inside the cancellable pipeline and never on a caller's thread.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn text(&self) -> io::Result<String>;
}

/// In-memory text; acquisition never fails.
#[async_trait]
impl TextSource for String {
    async fn text(&self) -> io::Result<String> {
        Ok(self.clone())
    }
}
