use ndarray::Array2;

/// Binary dilation with a 3x3 square kernel, repeated `iterations` times.
///
/// Closes one-pixel breaks in edge loops so that contour tracing sees them
/// as closed curves.
pub fn dilate_n(mask: &Array2<bool>, iterations: usize) -> Array2<bool> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = dilate(&current);
    }
    current
}

/// Binary dilation: a pixel becomes true if ANY pixel in its 3x3 neighborhood is true.
pub fn dilate(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for ((row, col), &set) in mask.indexed_iter() {
        if !set {
            continue;
        }
        let r0 = row.saturating_sub(1);
        let c0 = col.saturating_sub(1);
        let r1 = (row + 1).min(h - 1);
        let c1 = (col + 1).min(w - 1);
        for r in r0..=r1 {
            for c in c0..=c1 {
                result[[r, c]] = true;
            }
        }
    }

    result
}
