pub mod perspective;

pub use perspective::{warp_color, warp_frame, PerspectiveTransform};
