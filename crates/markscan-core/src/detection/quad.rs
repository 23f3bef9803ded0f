use ndarray::Array2;
use tracing::debug;

use crate::frame::{Point, Quadrilateral};

use super::config::QuadConfig;
use super::contours::{approximate_polygon, arc_length, external_contours, is_convex, polygon_area};

/// Everything the quadrilateral detector saw in one edge map.
#[derive(Clone, Debug, Default)]
pub struct QuadDetection {
    /// All external contours, for the diagnostics view.
    pub contours: Vec<Vec<Point>>,
    /// Qualifying quadrilaterals, largest first.
    pub quads: Vec<Quadrilateral>,
}

impl QuadDetection {
    /// The two largest quadrilaterals (sheet, grade box), if both exist.
    pub fn sheet_and_grade_box(&self) -> Option<(&Quadrilateral, &Quadrilateral)> {
        match self.quads.as_slice() {
            [sheet, grade, ..] => Some((sheet, grade)),
            _ => None,
        }
    }
}

/// Find convex 4-vertex polygons among the external contours of `edges`.
///
/// Never fails: when nothing qualifies the returned list is simply empty.
/// Callers that need a sheet and a grade box must check the length.
pub fn find_quadrilaterals(edges: &Array2<bool>, config: &QuadConfig) -> QuadDetection {
    let contours = external_contours(edges);

    let mut quads: Vec<Quadrilateral> = contours
        .iter()
        .filter_map(|contour| quadrilateral_from_contour(contour, config))
        .collect();

    // Stable: equal areas keep contour discovery order.
    quads.sort_by(|a, b| b.area.total_cmp(&a.area));

    debug!(
        contours = contours.len(),
        quadrilaterals = quads.len(),
        "Quadrilateral detection"
    );

    QuadDetection { contours, quads }
}

fn quadrilateral_from_contour(contour: &[Point], config: &QuadConfig) -> Option<Quadrilateral> {
    let area = polygon_area(contour);
    if area <= config.min_area {
        return None;
    }

    let perimeter = arc_length(contour, true);
    let approx = approximate_polygon(contour, config.poly_epsilon * perimeter);
    let points: [Point; 4] = approx.try_into().ok()?;
    if !is_convex(&points) {
        return None;
    }

    Some(Quadrilateral { points, area })
}
