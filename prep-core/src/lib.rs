pub mod config;
pub mod constants;
pub mod dataset;
pub mod ddl;
pub mod error;
pub mod files;
pub mod scripts;

pub use error::{PrepError, Result};
