//! Setup-time errors
//!
//! The per-frame animation path never fails; everything here happens while
//! parsing configuration or creating GPU resources.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("YAML parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("WebGL error: {0}")]
    Gl(String),
}

impl TreeError {
    pub fn gl(msg: impl Into<String>) -> Self {
        TreeError::Gl(msg.into())
    }
}

impl From<TreeError> for JsValue {
    fn from(err: TreeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
