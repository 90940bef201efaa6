use std::path::Path;

use thiserror::Error;

use super::schema::WindowConfig;
use crate::error::{validate_dimensions, WindowError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("validation: {0}")]
    Invalid(#[from] WindowError),
}

pub fn load_from_file(path: &Path) -> Result<WindowConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<WindowConfig, LoadError> {
    let cfg: WindowConfig = serde_yaml::from_str(yaml)?;
    validate_dimensions(cfg.window(), cfg.granularity())?;
    Ok(cfg)
}
