pub mod types;
pub mod error;
pub mod config;

pub use types::*;
pub use error::{BoardError, Result};
pub use config::{ConfigSource, ReportConfig, SparklineGeometry, load_config};
