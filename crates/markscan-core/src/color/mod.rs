pub mod luminance;

pub use luminance::{composite_add, luminance};
