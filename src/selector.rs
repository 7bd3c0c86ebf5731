//! Selector model shared by the page, its locators and the backends.
//!
//! A [`Target`] is the fully qualified address of an element: the chain of
//! iframes to enter, then the chain of selectors to apply inside the innermost
//! document. Targets are plain data; nothing here talks to a browser.

use std::fmt;

use serde::Serialize;

/// A single selector, in the subset of Playwright's syntax the page objects use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Selector {
    /// Plain CSS.
    Css(String),
    /// `id=<value>`.
    Id(String),
    /// `<scope> :text('<text>')` or `text=<text>`: the smallest elements whose
    /// text contains `text` (case-insensitive), optionally under a CSS scope.
    Text { scope: Option<String>, text: String },
}

impl Selector {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(id) = raw.strip_prefix("id=") {
            return Selector::Id(unquote(id).to_string());
        }
        if let Some(text) = raw.strip_prefix("text=") {
            return Selector::Text {
                scope: None,
                text: unquote(text).to_string(),
            };
        }
        if let Some(start) = raw.find(":text(") {
            if let Some(end) = raw.rfind(')').filter(|end| *end > start) {
                let scope = raw[..start].trim();
                let text = unquote(&raw[start + ":text(".len()..end]);
                return Selector::Text {
                    scope: (!scope.is_empty()).then(|| scope.to_string()),
                    text: text.to_string(),
                };
            }
        }
        Selector::Css(raw.to_string())
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Selector::parse(raw)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(css) => f.write_str(css),
            Selector::Id(id) => write!(f, "id={id}"),
            Selector::Text { scope: Some(scope), text } => write!(f, "{scope} :text('{text}')"),
            Selector::Text { scope: None, text } => write!(f, ":text('{text}')"),
        }
    }
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Which of the matched elements a segment resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "index", rename_all = "lowercase")]
pub enum Pick {
    /// All matches; actions require exactly one.
    #[default]
    Strict,
    First,
    Last,
    Nth(usize),
}

/// One hop of a target: a selector plus the pick applied to its matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub selector: Selector,
    pub pick: Pick,
}

impl Segment {
    pub fn new(selector: impl Into<Selector>) -> Self {
        Self {
            selector: selector.into(),
            pick: Pick::Strict,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        match self.pick {
            Pick::Strict => Ok(()),
            Pick::First => f.write_str(" >> nth=0"),
            Pick::Last => f.write_str(" >> nth=-1"),
            Pick::Nth(i) => write!(f, " >> nth={i}"),
        }
    }
}

/// Frames to enter, then selectors to apply inside the innermost frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub frames: Vec<Segment>,
    pub steps: Vec<Segment>,
}

impl Target {
    pub fn new(selector: impl Into<Selector>) -> Self {
        Self::within(Vec::new(), selector)
    }

    pub fn within(frames: Vec<Segment>, selector: impl Into<Selector>) -> Self {
        Self {
            frames,
            steps: vec![Segment::new(selector)],
        }
    }

    /// A descendant of this target.
    pub fn child(&self, selector: impl Into<Selector>) -> Self {
        let mut target = self.clone();
        target.steps.push(Segment::new(selector));
        target
    }

    /// This target with `pick` applied to its last step.
    pub fn picked(&self, pick: Pick) -> Self {
        let mut target = self.clone();
        if let Some(last) = target.steps.last_mut() {
            last.pick = pick;
        }
        target
    }

    /// Narrow a strict target to its first match; explicit picks are kept.
    pub fn first_match(&self) -> Self {
        match self.steps.last() {
            Some(last) if last.pick == Pick::Strict => self.picked(Pick::First),
            _ => self.clone(),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.steps.last().is_some_and(|s| s.pick == Pick::Strict)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for frame in &self.frames {
            write!(f, "{sep}{frame} >> internal:control=enter-frame")?;
            sep = " >> ";
        }
        for step in &self.steps {
            write!(f, "{sep}{step}")?;
            sep = " >> ";
        }
        Ok(())
    }
}
