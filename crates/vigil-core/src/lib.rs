pub mod detect;
pub mod error;
pub mod monitor;
pub mod select;
pub mod store;

pub use error::{Error, Result};
