use std::time::Duration;

use crate::browser::PoetBrowser;
use crate::error::{Error, Result};

/// Environment variable overriding [`Timeouts::workspace_boot`], in milliseconds.
pub const WORKSPACE_BOOT_TIMEOUT_ENV: &str = "POET_WORKSPACE_BOOT_TIMEOUT_MS";
/// Environment variable overriding [`Timeouts::workbench`], in milliseconds.
pub const WORKBENCH_TIMEOUT_ENV: &str = "POET_WORKBENCH_TIMEOUT_MS";

pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Auto-wait budget for actions and for `wait_for_selector` calls without
    /// an explicit timeout (default: 30s).
    pub default_timeout: Duration,
    /// How often selectors are re-evaluated while waiting (default: 100ms).
    pub poll_interval: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            default_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the default timeout for actions and `wait_for_selector`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<PoetBrowser> {
        PoetBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait budgets used by the wait-based getters of the home page object.
///
/// The defaults reflect how long a freshly provisioned cloud workspace takes
/// to come up; they are environment dependent and meant to be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Until the workspace has booted and the extension icon is in the activity bar.
    pub workspace_boot: Duration,
    /// Workbench widgets (explorer entries, problems panel) once the workspace is up.
    pub workbench: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            workspace_boot: Duration::from_millis(210_000),
            workbench: Duration::from_millis(90_000),
        }
    }
}

impl Timeouts {
    pub fn workspace_boot(mut self, timeout: Duration) -> Self {
        self.workspace_boot = timeout;
        self
    }

    pub fn workbench(mut self, timeout: Duration) -> Self {
        self.workbench = timeout;
        self
    }

    /// Defaults, overridden by [`WORKSPACE_BOOT_TIMEOUT_ENV`] and
    /// [`WORKBENCH_TIMEOUT_ENV`] when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut timeouts = Self::default();
        if let Some(ms) = parse_millis(WORKSPACE_BOOT_TIMEOUT_ENV, lookup(WORKSPACE_BOOT_TIMEOUT_ENV))? {
            timeouts.workspace_boot = ms;
        }
        if let Some(ms) = parse_millis(WORKBENCH_TIMEOUT_ENV, lookup(WORKBENCH_TIMEOUT_ENV))? {
            timeouts.workbench = ms;
        }
        Ok(timeouts)
    }
}

fn parse_millis(key: &str, raw: Option<String>) -> Result<Option<Duration>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|e| Error::ConfigError(format!("{key}={raw:?}: {e}")))
}
