pub mod types;

pub use types::{Frame, Region};
