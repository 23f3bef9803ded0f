//! Sheet localisation: edge map, quadrilateral candidates, corner order.

pub mod config;
pub mod contours;
pub mod corners;
pub mod edges;
pub mod morphology;
pub mod quad;

pub use config::{EdgeConfig, QuadConfig};
pub use corners::normalize_corners;
pub use edges::{extract_edges, EdgeMap};
pub use quad::{find_quadrilaterals, QuadDetection};
