#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use poet_home::{Backend, ElementState, Error, Page, Pick, Result, Segment, Target};
use tokio::time::Instant;

/// What a test scripted into the fake DOM for one target.
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub count: usize,
    pub visible: bool,
    pub enabled: bool,
    pub editable: bool,
    /// Not attached before this instant.
    pub appears_at: Option<Instant>,
    pub value: String,
}

impl FakeElement {
    pub fn visible() -> Self {
        Self {
            count: 1,
            visible: true,
            enabled: true,
            editable: false,
            appears_at: None,
            value: String::new(),
        }
    }

    pub fn input() -> Self {
        Self {
            editable: true,
            ..Self::visible()
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::visible()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::visible()
        }
    }

    pub fn times(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn appearing_after(mut self, delay: Duration) -> Self {
        self.appears_at = Some(Instant::now() + delay);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Click(String),
    Fill(String, String),
}

/// A document with its own iframes, for targets that cross frame boundaries.
/// Iframes are matched by selector in document order, the way the page engine
/// applies a frame hop's pick.
#[derive(Debug, Clone, Default)]
pub struct FakeFrame {
    iframes: Vec<(String, FakeFrame)>,
    elements: HashMap<String, FakeElement>,
}

impl FakeFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iframe(mut self, selector: &str, document: FakeFrame) -> Self {
        self.iframes.push((selector.to_string(), document));
        self
    }

    /// `key` is the rendered in-frame part of the target.
    pub fn with(mut self, key: &str, element: FakeElement) -> Self {
        self.elements.insert(key.to_string(), element);
        self
    }

    /// Index path of the document `frames` lands in, `None` when a hop
    /// matches no iframe.
    fn resolve(&self, frames: &[Segment]) -> Result<Option<Vec<usize>>> {
        let mut document = self;
        let mut path = Vec::new();
        for hop in frames {
            let selector = hop.selector.to_string();
            let matches: Vec<usize> = document
                .iframes
                .iter()
                .enumerate()
                .filter(|(_, (s, _))| *s == selector)
                .map(|(i, _)| i)
                .collect();
            let index = match (hop.pick, matches.as_slice()) {
                (_, []) => return Ok(None),
                (Pick::Strict, [only]) => *only,
                (Pick::Strict, many) => {
                    return Err(Error::StrictModeViolation(format!(
                        "frame {hop} resolved to {} elements",
                        many.len()
                    )))
                }
                (Pick::First, [first, ..]) => *first,
                (Pick::Last, [.., last]) => *last,
                (Pick::Nth(n), _) => match matches.get(n) {
                    Some(index) => *index,
                    None => return Ok(None),
                },
            };
            path.push(index);
            document = &document.iframes[index].1;
        }
        Ok(Some(path))
    }

    fn at(&self, path: &[usize]) -> &FakeFrame {
        path.iter().fold(self, |document, &i| &document.iframes[i].1)
    }

    fn at_mut(&mut self, path: &[usize]) -> &mut FakeFrame {
        path.iter().fold(self, |document, &i| &mut document.iframes[i].1)
    }
}

/// Where a target's element lives in the fake.
enum Slot {
    Flat(String),
    Framed(Vec<usize>, String),
    NoFrame,
}

#[derive(Default)]
struct Dom {
    elements: HashMap<String, FakeElement>,
    /// Mounted frame tree; frame-crossing targets resolve through it when set.
    root: Option<FakeFrame>,
    /// Clicking the key renders the value element.
    reveals: HashMap<String, (String, FakeElement)>,
    calls: Vec<Call>,
    probes: usize,
}

impl Dom {
    fn slot(&self, target: &Target) -> Result<Slot> {
        let root = match &self.root {
            Some(root) if !target.frames.is_empty() => root,
            _ => return Ok(Slot::Flat(FakeDom::key(target))),
        };
        let steps = Target {
            frames: Vec::new(),
            steps: target.steps.clone(),
        };
        Ok(match root.resolve(&target.frames)? {
            Some(path) => Slot::Framed(path, FakeDom::key(&steps)),
            None => Slot::NoFrame,
        })
    }

    fn element(&self, slot: &Slot) -> Option<&FakeElement> {
        match slot {
            Slot::Flat(key) => self.elements.get(key),
            Slot::Framed(path, key) => self.root.as_ref()?.at(path).elements.get(key),
            Slot::NoFrame => None,
        }
    }

    fn element_mut(&mut self, slot: &Slot) -> Option<&mut FakeElement> {
        match slot {
            Slot::Flat(key) => self.elements.get_mut(key),
            Slot::Framed(path, key) => self.root.as_mut()?.at_mut(path).elements.get_mut(key),
            Slot::NoFrame => None,
        }
    }
}

/// In-memory [`Backend`] keyed by the rendered target (pick of the last step
/// ignored), so tests can script exactly what each locator sees. Mount a
/// [`FakeFrame`] tree to resolve frame hops structurally instead.
#[derive(Default)]
pub struct FakeDom {
    dom: Mutex<Dom>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, key: impl Into<String>, element: FakeElement) {
        self.dom.lock().unwrap().elements.insert(key.into(), element);
    }

    pub fn mount(&self, root: FakeFrame) {
        self.dom.lock().unwrap().root = Some(root);
    }

    pub fn remove(&self, key: &str) {
        self.dom.lock().unwrap().elements.remove(key);
    }

    pub fn reveal_on_click(&self, trigger: impl Into<String>, key: impl Into<String>, element: FakeElement) {
        self.dom
            .lock()
            .unwrap()
            .reveals
            .insert(trigger.into(), (key.into(), element));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.dom.lock().unwrap().calls.clone()
    }

    pub fn probes(&self) -> usize {
        self.dom.lock().unwrap().probes
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.dom.lock().unwrap().elements.get(key).map(|e| e.value.clone())
    }

    fn key(target: &Target) -> String {
        target.picked(Pick::Strict).to_string()
    }

    fn attached(element: &FakeElement) -> bool {
        !element.appears_at.is_some_and(|at| Instant::now() < at)
    }
}

#[async_trait]
impl Backend for FakeDom {
    async fn probe(&self, target: &Target) -> Result<ElementState> {
        let mut dom = self.dom.lock().unwrap();
        dom.probes += 1;
        let slot = dom.slot(target)?;
        let state = match dom.element(&slot) {
            Some(el) if Self::attached(el) && el.count > 0 => ElementState {
                count: if target.is_strict() { el.count } else { 1 },
                visible: el.visible,
                enabled: el.enabled,
                editable: el.enabled && el.editable,
            },
            _ => ElementState::missing(),
        };
        Ok(state)
    }

    async fn click(&self, target: &Target) -> Result<()> {
        let key = Self::key(target);
        let mut dom = self.dom.lock().unwrap();
        let slot = dom.slot(target)?;
        if dom.element(&slot).is_none() {
            return Err(Error::ElementNotFound(key));
        }
        dom.calls.push(Call::Click(key.clone()));
        if let Some((revealed, element)) = dom.reveals.remove(&key) {
            dom.elements.insert(revealed, element);
        }
        Ok(())
    }

    async fn fill(&self, target: &Target, value: &str) -> Result<()> {
        let key = Self::key(target);
        let mut dom = self.dom.lock().unwrap();
        let slot = dom.slot(target)?;
        let Some(element) = dom.element_mut(&slot) else {
            return Err(Error::ElementNotFound(key));
        };
        element.value = value.to_string();
        dom.calls.push(Call::Fill(key, value.to_string()));
        Ok(())
    }
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn fake_page() -> Page<FakeDom> {
    init_tracing();
    Page::new(FakeDom::new(), DEFAULT_TIMEOUT)
}

/// Key a target inside the workspace webview renders under.
pub fn in_webview(selector: &str) -> String {
    format!(
        "iframe >> nth=-1 >> internal:control=enter-frame >> #active-frame \
         >> internal:control=enter-frame >> {selector}"
    )
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Paused-clock sleeps land on the timer's millisecond tick, so allow for
/// sub-millisecond rounding.
pub fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(1),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}
