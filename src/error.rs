use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid placement {0:?}: expected one of the eight canonical placements (e.g. \"top left\")")]
    InvalidPlacement(String),
    #[error("{0} element not found")]
    NotFound(&'static str),
    #[error("invalid settings: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PositionError>;
