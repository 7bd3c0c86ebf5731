use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    #[error("Navigation failed: {0}")]
    NavigationError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    #[error("Strict mode violation: {0}")]
    StrictModeViolation(String),

    #[error("JavaScript error: {0}")]
    JsError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("CDP error: {0}")]
    CdpError(#[from] chromiumoxide::error::CdpError),
}

pub type Result<T> = std::result::Result<T, Error>;
