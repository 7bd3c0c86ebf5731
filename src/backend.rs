use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::selector::Target;

/// Snapshot of what a target resolves to at one instant.
///
/// `visible`, `enabled` and `editable` describe the first resolved element and
/// are all `false` when `count == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ElementState {
    pub count: usize,
    pub visible: bool,
    pub enabled: bool,
    pub editable: bool,
}

impl ElementState {
    pub fn missing() -> Self {
        Self::default()
    }
}

/// The browser engine underneath a [`Page`](crate::page::Page).
///
/// Implementations resolve targets against the live DOM on every call and
/// never cache. Waiting and strictness are handled by the caller.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn probe(&self, target: &Target) -> Result<ElementState>;

    /// Click the first resolved element.
    async fn click(&self, target: &Target) -> Result<()>;

    /// Replace the value of the first resolved element.
    async fn fill(&self, target: &Target, value: &str) -> Result<()>;
}
