use ndarray::{Array2, Zip};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::{ColorFrame, Frame};

/// Collapse a color frame to BT.601 luminance.
pub fn luminance(color: &ColorFrame) -> Frame {
    let mut data = Array2::<f32>::zeros(color.red.data.dim());

    Zip::from(&mut data)
        .and(&color.red.data)
        .and(&color.green.data)
        .and(&color.blue.data)
        .for_each(|out, &r, &g, &b| {
            *out = LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b;
        });

    Frame::new(data)
}

/// Per-channel saturating sum of `base` and `overlay`.
///
/// Black overlay pixels leave the base untouched, so an annotation canvas
/// drawn on black can be laid over a photograph directly.
pub fn composite_add(base: &ColorFrame, overlay: &ColorFrame) -> ColorFrame {
    let add = |a: &Frame, b: &Frame| {
        let mut data = a.data.clone();
        Zip::from(&mut data)
            .and(&b.data)
            .for_each(|out, &v| *out = (*out + v).min(1.0));
        Frame::new(data)
    };

    ColorFrame {
        red: add(&base.red, &overlay.red),
        green: add(&base.green, &overlay.green),
        blue: add(&base.blue, &overlay.blue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_of_white_is_one() {
        let white = ColorFrame::from_gray(&Frame::new(Array2::from_elem((3, 3), 1.0)));
        let gray = luminance(&white);
        assert!(gray.data.iter().all(|&v| (v - 1.0).abs() < 1e-5));
    }

    #[test]
    fn composite_saturates_at_one() {
        let base = ColorFrame::from_gray(&Frame::new(Array2::from_elem((2, 2), 0.75)));
        let overlay = ColorFrame::from_gray(&Frame::new(Array2::from_elem((2, 2), 0.5)));
        let out = composite_add(&base, &overlay);
        assert_eq!(out.pixel(1, 1), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn black_overlay_is_identity() {
        let base = ColorFrame::from_gray(&Frame::new(Array2::from_elem((2, 2), 0.25)));
        let out = composite_add(&base, &ColorFrame::blank(2, 2));
        assert_eq!(out.pixel(0, 0), [0.25, 0.25, 0.25]);
    }
}
