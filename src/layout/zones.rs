//! Label anchor coordinates.
//!
//! Every function takes the key's top or left edge, the key's extent along
//! the same axis, and the layout's key pitch, and returns the label anchor on
//! that axis. The offsets are fixed visual tuning values.

/// Signature shared by all zone functions: `(edge, extent, key_width)`.
pub type ZoneFn = fn(f64, f64, f64) -> f64;

const SIDE_INSET: f64 = 0.08;
const TOP_INSET: f64 = 0.2;
const BOTTOM_INSET: f64 = 0.125;

/// Just inside the left edge.
pub fn left_edge(coord: f64, _extent: f64, key_width: f64) -> f64 {
    coord + key_width * SIDE_INSET
}

/// Below the top edge, leaving room for the text ascent.
pub fn top_edge(coord: f64, _extent: f64, key_width: f64) -> f64 {
    coord + key_width * TOP_INSET
}

pub fn right_edge(coord: f64, extent: f64, key_width: f64) -> f64 {
    coord + extent - key_width * SIDE_INSET
}

pub fn bottom_edge(coord: f64, extent: f64, key_width: f64) -> f64 {
    coord + extent - key_width * BOTTOM_INSET
}

pub fn center_line(coord: f64, extent: f64, _key_width: f64) -> f64 {
    coord + extent * 0.5
}

/// The printed front face of the key, one key pitch below its top edge.
///
/// Taller keys still use a single pitch.
pub fn front_edge(coord: f64, _extent: f64, key_width: f64) -> f64 {
    coord + key_width
}

#[cfg(test)]
mod tests {
    use super::*;

    const KW: f64 = 19.05;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn edge_insets_use_key_width() {
        assert!(close(left_edge(10.0, 38.1, KW), 10.0 + 1.524));
        assert!(close(top_edge(10.0, 38.1, KW), 10.0 + 3.81));
        assert!(close(right_edge(10.0, 38.1, KW), 10.0 + 38.1 - 1.524));
        assert!(close(bottom_edge(10.0, 38.1, KW), 10.0 + 38.1 - 2.38125));
    }

    #[test]
    fn center_ignores_key_width() {
        for (coord, extent) in [(0.0, 19.05), (-4.5, 42.0), (100.0, 0.0)] {
            let expected = coord + extent / 2.0;
            assert!(close(center_line(coord, extent, KW), expected));
            assert!(close(center_line(coord, extent, 1.0), expected));
        }
    }

    #[test]
    fn front_ignores_extent() {
        for extent in [19.05, 38.1, 95.25] {
            assert!(close(front_edge(3.0, extent, KW), 3.0 + KW));
        }
    }

    #[test]
    fn left_and_top_ignore_extent() {
        assert!(close(left_edge(1.0, 5.0, KW), left_edge(1.0, 500.0, KW)));
        assert!(close(top_edge(1.0, 5.0, KW), top_edge(1.0, 500.0, KW)));
    }
}
