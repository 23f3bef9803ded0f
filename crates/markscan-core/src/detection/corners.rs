use crate::frame::{CanonicalQuad, Point};

/// Relabel four points as top-left, top-right, bottom-left, bottom-right.
///
/// Smallest `x + y` is top-left and largest is bottom-right. Of the other
/// two, the one with the smaller `y - x` is top-right. Top-left takes the
/// earliest of tied minima and bottom-right the latest of tied maxima, so a
/// canonical quad (bottom-right last) comes back unchanged even when its
/// corner sums tie, as they do for a quad rotated by 45 degrees.
pub fn normalize_corners(points: &[Point; 4]) -> CanonicalQuad {
    let sum = |i: usize| points[i].x + points[i].y;
    let diff = |i: usize| points[i].y - points[i].x;

    let tl = (0..4)
        .reduce(|best, i| if sum(i) < sum(best) { i } else { best })
        .unwrap_or(0);
    let br = (0..4)
        .filter(|&i| i != tl)
        .reduce(|best, i| if sum(i) >= sum(best) { i } else { best })
        .unwrap_or(3);

    let rest: Vec<usize> = (0..4).filter(|&i| i != tl && i != br).collect();
    let (a, b) = (rest[0], rest[1]);
    let (tr, bl) = if diff(b) < diff(a) { (b, a) } else { (a, b) };

    CanonicalQuad {
        top_left: points[tl],
        top_right: points[tr],
        bottom_left: points[bl],
        bottom_right: points[br],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_a_shuffled_rectangle() {
        let pts = [
            Point::new(100.0, 80.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 80.0),
            Point::new(100.0, 0.0),
        ];
        let q = normalize_corners(&pts);
        assert_eq!(q.top_left, Point::new(0.0, 0.0));
        assert_eq!(q.top_right, Point::new(100.0, 0.0));
        assert_eq!(q.bottom_left, Point::new(0.0, 80.0));
        assert_eq!(q.bottom_right, Point::new(100.0, 80.0));
    }
}
