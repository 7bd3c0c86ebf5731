use async_trait::async_trait;
use chromiumoxide::layout::Point;
use chromiumoxide::page::Page as CrPage;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::trace;

use crate::backend::{Backend, ElementState};
use crate::error::{Error, Result};
use crate::selector::Target;

/// [`Backend`] over a chromiumoxide page.
///
/// Targets are resolved by an injected script, entering iframes through
/// `contentDocument`, so only same-origin frames are reachable. Clicks are
/// real CDP mouse events at the element's center; fills set the value and
/// dispatch `input` and `change`.
#[derive(Clone)]
pub struct CdpBackend {
    inner: CrPage,
}

impl CdpBackend {
    pub fn new(inner: CrPage) -> Self {
        Self { inner }
    }

    /// Returns a reference to the underlying chromiumoxide Page.
    pub fn inner(&self) -> &CrPage {
        &self.inner
    }

    async fn run<T: DeserializeOwned>(&self, target: &Target, body: &str) -> Result<T> {
        let js = script(target, body)?;
        trace!(locator = %target, "evaluating resolver script");
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        let json: String = result
            .into_value()
            .map_err(|e| Error::JsError(e.to_string()))?;
        match serde_json::from_str::<Reply<T>>(&json).map_err(|e| Error::JsError(e.to_string()))? {
            Reply::Done(value) => Ok(value),
            Reply::Failed { error } => {
                let frame = target
                    .frames
                    .get(error.frame)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                Err(Error::StrictModeViolation(format!(
                    "frame {frame} resolved to {} elements",
                    error.count
                )))
            }
        }
    }
}

#[async_trait]
impl Backend for CdpBackend {
    async fn probe(&self, target: &Target) -> Result<ElementState> {
        self.run(target, PROBE_JS).await
    }

    async fn click(&self, target: &Target) -> Result<()> {
        let center: Option<Center> = self.run(target, CENTER_JS).await?;
        let center = center.ok_or_else(|| Error::ElementNotFound(format!("{target} detached before click")))?;
        self.inner
            .click(Point {
                x: center.x,
                y: center.y,
            })
            .await?;
        Ok(())
    }

    async fn fill(&self, target: &Target, value: &str) -> Result<()> {
        let value_js = serde_json::to_string(value).map_err(|e| Error::JsError(e.to_string()))?;
        let body = format!("const value = {value_js};\n{FILL_JS}");
        let filled: bool = self.run(target, &body).await?;
        if filled {
            Ok(())
        } else {
            Err(Error::ElementNotFound(format!("{target} detached before fill")))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reply<T> {
    Failed { error: FrameAmbiguity },
    Done(T),
}

#[derive(Deserialize)]
struct FrameAmbiguity {
    frame: usize,
    count: usize,
}

#[derive(Deserialize)]
struct Center {
    x: f64,
    y: f64,
}

/// Wrap `body` so it runs with `els` (resolved elements) and `frames` (the
/// entered iframe elements, outermost first) in scope. `body` must return a
/// JSON string.
fn script(target: &Target, body: &str) -> Result<String> {
    let target_js = serde_json::to_string(target).map_err(|e| Error::JsError(e.to_string()))?;
    Ok(format!(
        r#"
        (() => {{
            {RESOLVE_JS}
            const resolved = resolve({target_js});
            if (resolved.error) return JSON.stringify({{ error: resolved.error }});
            const els = resolved.els;
            const frames = resolved.frames;
            {body}
        }})()
        "#
    ))
}

static RESOLVE_JS: &str = r#"
const isFrame = (el) => el.tagName === 'IFRAME' || el.tagName === 'FRAME';
const lookup = (scope, sel) => {
    switch (sel.kind) {
        case 'css':
            return Array.from(scope.querySelectorAll(sel.value));
        case 'id':
            return Array.from(scope.querySelectorAll('[id=' + JSON.stringify(sel.value) + ']'));
        case 'text': {
            const needle = sel.value.text.toLowerCase();
            const holds = (el) => (el.textContent || '').toLowerCase().includes(needle);
            const roots = sel.value.scope
                ? Array.from(scope.querySelectorAll(sel.value.scope))
                : [scope.body || scope];
            const out = [];
            for (const root of roots) {
                for (const el of [root, ...root.querySelectorAll('*')]) {
                    if (!el.tagName || !holds(el)) continue;
                    if (Array.from(el.children).some(holds)) continue;
                    if (el === root && sel.value.scope) continue;
                    if (!out.includes(el)) out.push(el);
                }
            }
            return out;
        }
    }
    return [];
};
const pick = (els, p) => {
    switch (p.mode) {
        case 'first': return els.slice(0, 1);
        case 'last': return els.slice(-1);
        case 'nth': return els.slice(p.index, p.index + 1);
        default: return els;
    }
};
const resolve = (target) => {
    let root = document;
    const frames = [];
    for (let i = 0; i < target.frames.length; i++) {
        const hop = target.frames[i];
        const found = pick(lookup(root, hop.selector).filter(isFrame), hop.pick);
        if (found.length > 1) return { error: { frame: i, count: found.length } };
        if (found.length === 0 || !found[0].contentDocument) return { els: [], frames };
        frames.push(found[0]);
        root = found[0].contentDocument;
    }
    let els = [root];
    for (const step of target.steps) {
        const next = [];
        for (const scope of els) {
            for (const el of lookup(scope, step.selector)) {
                if (!next.includes(el)) next.push(el);
            }
        }
        els = pick(next, step.pick);
    }
    return { els, frames };
};
"#;

static PROBE_JS: &str = r#"
const el = els[0];
if (!el) return JSON.stringify({ count: 0, visible: false, enabled: false, editable: false });
const rect = el.getBoundingClientRect();
const style = el.ownerDocument.defaultView.getComputedStyle(el);
const visible = rect.width > 0 && rect.height > 0 && style.visibility !== 'hidden';
const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true';
const editable = enabled && !el.readOnly
    && (el.isContentEditable || ['INPUT', 'TEXTAREA', 'SELECT'].includes(el.tagName));
return JSON.stringify({ count: els.length, visible, enabled, editable });
"#;

static CENTER_JS: &str = r#"
const el = els[0];
if (!el || !el.isConnected) return JSON.stringify(null);
el.scrollIntoView({ block: 'center', inline: 'center' });
const rect = el.getBoundingClientRect();
let x = rect.left + rect.width / 2;
let y = rect.top + rect.height / 2;
for (const frame of frames) {
    const fr = frame.getBoundingClientRect();
    x += fr.left + frame.clientLeft;
    y += fr.top + frame.clientTop;
}
return JSON.stringify({ x, y });
"#;

static FILL_JS: &str = r#"
const el = els[0];
if (!el || !el.isConnected) return JSON.stringify(false);
el.focus();
if (el.isContentEditable) {
    el.textContent = value;
} else {
    const proto = Object.getPrototypeOf(el);
    const desc = Object.getOwnPropertyDescriptor(proto, 'value');
    if (desc && desc.set) desc.set.call(el, value); else el.value = value;
}
el.dispatchEvent(new Event('input', { bubbles: true }));
el.dispatchEvent(new Event('change', { bubbles: true }));
return JSON.stringify(true);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{Pick, Segment};

    #[test]
    fn script_embeds_target_as_json() {
        let target = Target::within(
            vec![Segment {
                selector: "iframe".into(),
                pick: Pick::Last,
            }],
            "id=list_id_1_10",
        );
        let js = script(&target, PROBE_JS).unwrap();
        assert!(js.contains(r#""kind":"id","value":"list_id_1_10""#));
        assert!(js.contains(r#""mode":"last""#));
        assert!(js.contains("const resolved = resolve("));
    }

    #[test]
    fn reply_distinguishes_frame_ambiguity() {
        let failed: Reply<ElementState> =
            serde_json::from_str(r#"{"error":{"frame":0,"count":3}}"#).unwrap();
        assert!(matches!(failed, Reply::Failed { error } if error.count == 3));

        let done: Reply<ElementState> = serde_json::from_str(
            r#"{"count":1,"visible":true,"enabled":true,"editable":false}"#,
        )
        .unwrap();
        assert!(matches!(done, Reply::Done(state) if state.visible && state.count == 1));

        let detached: Reply<Option<Center>> = serde_json::from_str("null").unwrap();
        assert!(matches!(detached, Reply::Done(None)));
    }
}
