use imageproc::contours::{find_contours, BorderType};
use ndarray::Array2;

use crate::frame::Point;
use crate::io::image_io::gray_from_mask;

/// Outer borders of the top-level foreground regions of `mask`.
///
/// Contours nested inside another region's hole are skipped, so a shape
/// drawn inside a box never shows up next to the box itself.
pub fn external_contours(mask: &Array2<bool>) -> Vec<Vec<Point>> {
    find_contours::<u32>(&gray_from_mask(mask))
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            c.points
                .iter()
                .map(|p| Point::new(p.x as f64, p.y as f64))
                .collect()
        })
        .collect()
}

/// Absolute enclosed area of a closed polygon (shoelace formula).
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() / 2.0
}

/// Length of a polyline; `closed` adds the segment from the last point back
/// to the first.
pub fn arc_length(points: &[Point], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) if points.len() > 1 => open + last.distance(first),
        _ => open,
    }
}

/// True when the closed polygon turns the same way at every vertex.
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Douglas-Peucker simplification of a closed contour.
///
/// The contour is split at its first point and the point farthest from it,
/// each half is simplified independently, and finally vertices lying within
/// `epsilon` of the chord joining their neighbours are dropped. The last
/// pass removes the split vertex when it falls in the middle of a side.
pub fn approximate_polygon(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let start = points[0];
    let far = points
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| start.distance(a).total_cmp(&start.distance(b)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    if far == 0 {
        return vec![start];
    }

    let mut polygon = simplify_open(&points[..=far], epsilon);
    let back: Vec<Point> = points[far..]
        .iter()
        .chain(std::iter::once(&start))
        .copied()
        .collect();
    let back = simplify_open(&back, epsilon);
    polygon.extend_from_slice(&back[1..back.len() - 1]);

    drop_collinear(polygon, epsilon)
}

/// Open-curve Douglas-Peucker; keeps both endpoints.
fn simplify_open(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    let (first, last) = (points[0], points[n - 1]);

    let (split, max_dist) = points[1..n - 1]
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, line_distance(p, &first, &last)))
        .fold((0, -1.0_f64), |best, cur| if cur.1 > best.1 { cur } else { best });

    if max_dist > epsilon {
        let mut left = simplify_open(&points[..=split], epsilon);
        let right = simplify_open(&points[split..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn drop_collinear(mut polygon: Vec<Point>, epsilon: f64) -> Vec<Point> {
    let mut changed = true;
    while changed && polygon.len() > 3 {
        changed = false;
        let n = polygon.len();
        for i in 0..n {
            let prev = polygon[(i + n - 1) % n];
            let next = polygon[(i + 1) % n];
            if line_distance(&polygon[i], &prev, &next) <= epsilon {
                polygon.remove(i);
                changed = true;
                break;
            }
        }
    }
    polygon
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
fn line_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let len = a.distance(b);
    if len == 0.0 {
        return p.distance(a);
    }
    ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / len
}
