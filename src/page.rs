use std::time::Duration;

use chromiumoxide::page::Page as CrPage;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::backend::{Backend, ElementState};
use crate::cdp::CdpBackend;
use crate::error::{Error, Result};
use crate::locator::{FrameLocator, Locator};
use crate::selector::Target;

/// A browser tab as seen by page objects.
///
/// Owns its [`Backend`]; page objects borrow the page. All lookups are lazy and
/// re-evaluated against the live DOM on each use.
pub struct Page<B: Backend = CdpBackend> {
    backend: B,
    default_timeout: Duration,
    poll_interval: Duration,
}

impl<B: Backend> Page<B> {
    pub fn new(backend: B, default_timeout: Duration) -> Self {
        Self {
            backend,
            default_timeout,
            poll_interval: Duration::from_millis(100),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Auto-wait budget for actions and for [`Page::wait_for_selector_default`].
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    // ── Element Queries ─────────────────────────────────────────────

    /// A lazy locator for `selector`. Never fails; resolution happens on use.
    pub fn locator(&self, selector: &str) -> Locator<'_, B> {
        Locator::new(self, Target::new(selector))
    }

    /// A locator for the document inside the iframe(s) matching `selector`.
    pub fn frame_locator(&self, selector: &str) -> FrameLocator<'_, B> {
        FrameLocator::new(self, selector)
    }

    /// Whether the first element matching `selector` is visible right now.
    /// Does not wait; a missing element reads `false`.
    pub async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.locator(selector).is_visible().await
    }

    /// Wait until an element matching `selector` is visible, polling every
    /// poll interval up to `timeout`.
    ///
    /// The returned locator is narrowed to the first match, the one the wait
    /// saw, so actions on it do not trip strict mode when the selector is
    /// ambiguous.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<Locator<'_, B>> {
        let locator = self.locator(selector).first();
        self.wait_for_visible(locator.target(), timeout).await?;
        Ok(locator)
    }

    /// [`Page::wait_for_selector`] with the page's default timeout.
    pub async fn wait_for_selector_default(&self, selector: &str) -> Result<Locator<'_, B>> {
        self.wait_for_selector(selector, self.default_timeout).await
    }

    // ── Waiting ─────────────────────────────────────────────────────

    pub(crate) async fn wait_for_visible(&self, target: &Target, timeout: Duration) -> Result<()> {
        let target = target.first_match();
        debug!(locator = %target, timeout_ms = timeout.as_millis() as u64, "waiting for selector");
        let deadline = Instant::now() + timeout;

        loop {
            let state = self.backend.probe(&target).await?;
            if state.visible {
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                warn!(locator = %target, "timed out waiting for selector");
                return Err(Error::Timeout(format!(
                    "{target} to be visible ({} ms)",
                    timeout.as_millis()
                )));
            }
            trace!(locator = %target, count = state.count, "selector not visible yet");
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// Wait until `target` can receive a click (or a fill, when `editable`).
    pub(crate) async fn wait_actionable(&self, target: &Target, editable: bool) -> Result<()> {
        let timeout = self.default_timeout;
        let deadline = Instant::now() + timeout;

        loop {
            let state = self.backend.probe(target).await?;
            if target.is_strict() && state.count > 1 {
                return Err(Error::StrictModeViolation(format!(
                    "{target} resolved to {} elements",
                    state.count
                )));
            }
            if state.visible && state.enabled && (state.editable || !editable) {
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                warn!(locator = %target, count = state.count, "element never became actionable");
                return Err(match blocker(&state, editable) {
                    None => Error::ElementNotFound(format!("{target} (waited {} ms)", timeout.as_millis())),
                    Some(reason) => Error::NotInteractable(format!("{target} is {reason}")),
                });
            }
            trace!(locator = %target, count = state.count, "element not actionable yet");
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}

/// Why an element that exists cannot be acted on; `None` when it does not exist.
fn blocker(state: &ElementState, editable: bool) -> Option<&'static str> {
    if state.count == 0 {
        None
    } else if !state.visible {
        Some("not visible")
    } else if !state.enabled {
        Some("disabled")
    } else if editable && !state.editable {
        Some("not editable")
    } else {
        Some("not actionable")
    }
}

impl Page<CdpBackend> {
    pub(crate) fn from_chrome(inner: CrPage, default_timeout: Duration, poll_interval: Duration) -> Self {
        Page::new(CdpBackend::new(inner), default_timeout).with_poll_interval(poll_interval)
    }

    /// Returns a reference to the underlying chromiumoxide Page.
    pub fn inner(&self) -> &CrPage {
        self.backend.inner()
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner()
            .goto(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;
        Ok(())
    }

    /// Get the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.inner()
            .url()
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?
            .ok_or_else(|| Error::NavigationError("No URL found".into()))
    }

    /// Get the current page title.
    pub async fn title(&self) -> Result<String> {
        let result = self
            .inner()
            .evaluate("document.title")
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        title_from(result.value())
    }

    /// Get the full HTML content of the page.
    pub async fn html(&self) -> Result<String> {
        self.inner()
            .content()
            .await
            .map_err(|e| Error::JsError(e.to_string()))
    }
}

fn title_from(value: Option<&serde_json::Value>) -> Result<String> {
    value
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::JsError(format!("document.title is not a string: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocker_prefers_visibility_over_enabled() {
        let hidden = ElementState {
            count: 1,
            visible: false,
            enabled: false,
            editable: false,
        };
        assert_eq!(blocker(&hidden, true), Some("not visible"));
        assert_eq!(blocker(&ElementState::missing(), false), None);
    }

    #[test]
    fn blocker_reports_read_only_inputs() {
        let read_only = ElementState {
            count: 1,
            visible: true,
            enabled: true,
            editable: false,
        };
        assert_eq!(blocker(&read_only, true), Some("not editable"));
    }

    #[test]
    fn title_must_be_a_string() {
        let title = serde_json::json!("POET");
        assert_eq!(title_from(Some(&title)).unwrap(), "POET");

        let err = title_from(None).unwrap_err();
        assert!(matches!(err, Error::JsError(msg) if msg.contains("document.title")));
        let err = title_from(Some(&serde_json::json!(42))).unwrap_err();
        assert!(matches!(err, Error::JsError(_)));
    }
}
