pub mod backend;
pub mod browser;
pub mod cdp;
pub mod config;
pub mod error;
pub mod home;
pub mod locator;
pub mod page;
pub mod selector;
pub mod selectors;

pub use backend::{Backend, ElementState};
pub use browser::PoetBrowser;
pub use cdp::CdpBackend;
pub use config::{BrowserBuilder, BrowserConfig, Timeouts};
pub use error::{Error, Result};
pub use home::HomePoet;
pub use locator::{FrameLocator, Locator};
pub use page::Page;
pub use selector::{Pick, Segment, Selector, Target};
