pub mod text;

pub use text::{contains_any, truncate_chars};
