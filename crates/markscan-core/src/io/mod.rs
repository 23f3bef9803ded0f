pub mod image_io;
pub mod source;

pub use image_io::{load_resized, save_color_image};
pub use source::{FileSink, FileStore, FrameSink, FrameSource, ImageFileSource, ResultStore};
