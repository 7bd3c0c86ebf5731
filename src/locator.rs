use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::backend::Backend;
use crate::error::Result;
use crate::page::Page;
use crate::selector::{Pick, Segment, Target};

/// Lazy reference to the element(s) matching a [`Target`] on a page.
///
/// Holds no element handle: every call resolves the target again, so a
/// locator stays valid across re-renders.
pub struct Locator<'p, B: Backend> {
    page: &'p Page<B>,
    target: Target,
}

impl<'p, B: Backend> Locator<'p, B> {
    pub(crate) fn new(page: &'p Page<B>, target: Target) -> Self {
        Self { page, target }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Descendants of this locator matching `selector`.
    pub fn locator(&self, selector: &str) -> Self {
        Self::new(self.page, self.target.child(selector))
    }

    pub fn first(&self) -> Self {
        Self::new(self.page, self.target.picked(Pick::First))
    }

    pub fn last(&self) -> Self {
        Self::new(self.page, self.target.picked(Pick::Last))
    }

    pub fn nth(&self, index: usize) -> Self {
        Self::new(self.page, self.target.picked(Pick::Nth(index)))
    }

    /// Number of elements this locator currently resolves to.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.page.backend().probe(&self.target).await?.count)
    }

    /// Point-in-time visibility of the first match.
    pub async fn is_visible(&self) -> Result<bool> {
        Ok(self.page.backend().probe(&self.target.first_match()).await?.visible)
    }

    /// Wait up to `timeout` for the first match to become visible.
    pub async fn wait_for(&self, timeout: Duration) -> Result<()> {
        self.page.wait_for_visible(&self.target, timeout).await
    }

    /// Click the element once it is visible and enabled.
    pub async fn click(&self) -> Result<()> {
        debug!(locator = %self.target, "click");
        self.page.wait_actionable(&self.target, false).await?;
        self.page.backend().click(&self.target).await
    }

    /// Replace the element's value once it is visible and editable.
    pub async fn fill(&self, value: &str) -> Result<()> {
        debug!(locator = %self.target, len = value.len(), "fill");
        self.page.wait_actionable(&self.target, true).await?;
        self.page.backend().fill(&self.target, value).await
    }
}

impl<B: Backend> Clone for Locator<'_, B> {
    fn clone(&self) -> Self {
        Self::new(self.page, self.target.clone())
    }
}

impl<B: Backend> fmt::Debug for Locator<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locator({})", self.target)
    }
}

/// Scope into the document of an iframe, possibly nested.
pub struct FrameLocator<'p, B: Backend> {
    page: &'p Page<B>,
    frames: Vec<Segment>,
}

impl<'p, B: Backend> FrameLocator<'p, B> {
    pub(crate) fn new(page: &'p Page<B>, selector: &str) -> Self {
        Self {
            page,
            frames: vec![Segment::new(selector)],
        }
    }

    pub fn frames(&self) -> &[Segment] {
        &self.frames
    }

    pub fn first(&self) -> Self {
        self.picked(Pick::First)
    }

    pub fn last(&self) -> Self {
        self.picked(Pick::Last)
    }

    pub fn nth(&self, index: usize) -> Self {
        self.picked(Pick::Nth(index))
    }

    /// An iframe matching `selector` inside this frame.
    pub fn frame_locator(&self, selector: &str) -> Self {
        let mut frames = self.frames.clone();
        frames.push(Segment::new(selector));
        Self {
            page: self.page,
            frames,
        }
    }

    /// Elements matching `selector` inside the innermost frame.
    pub fn locator(&self, selector: &str) -> Locator<'p, B> {
        Locator::new(self.page, Target::within(self.frames.clone(), selector))
    }

    fn picked(&self, pick: Pick) -> Self {
        let mut frames = self.frames.clone();
        if let Some(last) = frames.last_mut() {
            last.pick = pick;
        }
        Self {
            page: self.page,
            frames,
        }
    }
}

impl<B: Backend> Clone for FrameLocator<'_, B> {
    fn clone(&self) -> Self {
        Self {
            page: self.page,
            frames: self.frames.clone(),
        }
    }
}

impl<B: Backend> fmt::Debug for FrameLocator<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FrameLocator(")?;
        let mut sep = "";
        for frame in &self.frames {
            write!(f, "{sep}{frame}")?;
            sep = " >> internal:control=enter-frame >> ";
        }
        f.write_str(")")
    }
}
