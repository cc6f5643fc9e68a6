mod error;
pub mod proto;

pub use error::{Error, Result};
