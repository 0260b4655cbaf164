mod expander;
pub mod resolver;

pub use expander::{HomeDirNotFound, PathExpander};
pub use resolver::{resolve, ResolveError};
