//! Optical mark recognition for photographed multiple-choice answer sheets.
//!
//! A frame flows through edge extraction, quadrilateral detection, corner
//! normalization, perspective rectification, bubble-grid segmentation,
//! response classification and grading; the verdict is then drawn on the
//! rectified sheet and projected back onto the photograph.

pub mod color;
pub mod consts;
pub mod detection;
pub mod error;
pub mod filters;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod pipeline;
pub mod render;
