//! Error types for costing model construction

use thiserror::Error;

use crate::costing::Mode;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no costing model for mode '{}'", .0.name())]
    UnsupportedMode(Mode),
    #[error("invalid costing config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
