//! Opens links with the operating system's default handler.

use async_trait::async_trait;

use crate::menu::action::ExternalOpener;
use crate::menu::error::ActionError;

/// The production opener, backed by the `open` crate.
pub struct SystemOpener;

/// Only web links are handed to the system; anything else could launch
/// arbitrary local programs.
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[async_trait]
impl ExternalOpener for SystemOpener {
    async fn open(&self, url: &str) -> Result<(), ActionError> {
        if !is_web_url(url) {
            return Err(ActionError::UnsupportedUrl(url.to_string()));
        }

        // `open::that` waits on the launcher process, so keep it off the UI thread.
        let target = url.to_string();
        tokio::task::spawn_blocking(move || open::that(&target))
            .await?
            .map_err(|source| ActionError::OpenExternal {
                url: url.to_string(),
                source,
            })?;

        tracing::info!("Opened {} in the default browser.", url);
        Ok(())
    }
}
