use thiserror::Error;

/// Errors raised by lifecycle misuse.
///
/// Per-frame simulation never fails; only calls that violate the state
/// machine or name an unknown scene surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("scene '{scene}' is destroyed and cannot be {action}")]
    Destroyed { scene: String, action: &'static str },

    #[error("no scene registered under the given id")]
    UnknownScene,
}

pub type Result<T> = std::result::Result<T, SceneError>;
