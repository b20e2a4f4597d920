use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeartsError {
    #[error("Color palette is empty")]
    EmptyPalette,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid horizontal offset range: min {min}, max {max}")]
    InvalidOffsetRange { min: f64, max: f64 },
    #[error("Animation duration must be greater than zero")]
    InvalidDuration,
    #[error("Invalid terminal scale: {0}")]
    InvalidShrink(f64),
    #[error("Invalid heart size: {0}")]
    InvalidHeartSize(f64),
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
