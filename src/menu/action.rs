//! Custom menu actions and the external-open seam they depend on.

use async_trait::async_trait;
use std::sync::Arc;

use super::error::ActionError;

/// A zero-argument asynchronous callback attached to a custom menu item.
#[async_trait]
pub trait MenuAction: Send + Sync {
    async fn run(&self) -> Result<(), ActionError>;
}

/// Asks the operating system to open a URL with its default handler.
///
/// A mock implementation is used in tests so that no browser is launched.
#[async_trait]
pub trait ExternalOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), ActionError>;
}

/// Opens a fixed URL in the system browser.
pub struct OpenExternal {
    url: String,
    opener: Arc<dyn ExternalOpener>,
}

impl OpenExternal {
    pub fn new(url: impl Into<String>, opener: Arc<dyn ExternalOpener>) -> Self {
        Self {
            url: url.into(),
            opener,
        }
    }
}

#[async_trait]
impl MenuAction for OpenExternal {
    async fn run(&self) -> Result<(), ActionError> {
        tracing::debug!("Opening external link {}", self.url);
        self.opener.open(&self.url).await
    }
}
