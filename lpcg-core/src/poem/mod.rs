//! The poem as a chain of testable lines.

mod builder;
pub mod line;

pub use builder::PoemChain;
pub use line::{BEGINNING_TEXT, LineRef, PoemLine};
