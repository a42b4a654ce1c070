use std::ops::Mul;

/// A point in the image plane, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2d {
    /// x coordinate (columns, growing to the right).
    pub x: f64,
    /// y coordinate (rows, growing downwards).
    pub y: f64,
}

impl Point2d {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2d {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A 2D affine transform stored as a 3x3 homogeneous matrix.
///
/// Points are row vectors multiplied on the left, `[x', y', 1] = [x, y, 1] * M`,
/// so the translation lives in the last row and the last column is always
/// `(0, 0, 1)`:
///
/// | a  b  0 |
/// | c  d  0 |
/// | tx ty 1 |
///
/// Under this convention `a.compose(&b)` applies `a` first and `b` second.
///
/// # Example
///
/// ```
/// use rotscale_imgproc::{AffineMatrix, Point2d};
///
/// let m = AffineMatrix::from_translation(-2.0, -1.0).compose(&AffineMatrix::from_scale(2.0, 3.0));
/// let p = m.apply(Point2d::new(3.0, 2.0));
///
/// assert_eq!(p, Point2d::new(2.0, 3.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMatrix {
    /// Row-major matrix entries.
    pub data: [f64; 9],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            data: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// A translation by `(tx, ty)`.
    pub const fn from_translation(tx: f64, ty: f64) -> Self {
        Self {
            data: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 1.0],
        }
    }

    /// A rotation about the origin by `angle_deg` degrees.
    ///
    /// Positive angles turn counter-clockwise as seen on screen, where y grows
    /// downwards: the x axis `(1, 0)` is mapped to `(0, -1)` at 90 degrees.
    pub fn from_rotation(angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self {
            data: [cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// An axis-aligned scaling about the origin.
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self {
            data: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Returns the transform that applies `self` and then `rhs`.
    pub fn compose(&self, rhs: &AffineMatrix) -> AffineMatrix {
        let (a, b) = (&self.data, &rhs.data);
        let mut data = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                data[i * 3 + j] = (0..3).map(|k| a[i * 3 + k] * b[k * 3 + j]).sum();
            }
        }
        AffineMatrix { data }
    }

    /// Maps a point through the transform.
    pub fn apply(&self, p: Point2d) -> Point2d {
        let m = &self.data;
        Point2d {
            x: p.x * m[0] + p.y * m[3] + m[6],
            y: p.x * m[1] + p.y * m[4] + m[7],
        }
    }

    /// Returns the inverse transform, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<AffineMatrix> {
        let [a, b, _, c, d, _, tx, ty, _] = self.data;

        let determinant = a * d - b * c;
        if determinant == 0.0 || !determinant.is_finite() {
            return None;
        }
        let inv_det = 1.0 / determinant;

        let (ia, ib) = (d * inv_det, -b * inv_det);
        let (ic, id) = (-c * inv_det, a * inv_det);
        let itx = -(tx * ia + ty * ic);
        let ity = -(tx * ib + ty * id);

        Some(AffineMatrix {
            data: [ia, ib, 0.0, ic, id, 0.0, itx, ity, 1.0],
        })
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::{AffineMatrix, Point2d};
    use approx::assert_relative_eq;

    fn assert_point_eq(a: Point2d, b: Point2d) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
    }

    #[test]
    fn identity_is_neutral() {
        let m = AffineMatrix::from_rotation(33.0) * AffineMatrix::from_translation(4.0, -2.0);
        assert_eq!(AffineMatrix::identity().compose(&m), m);
        assert_eq!(m.compose(&AffineMatrix::identity()), m);
        assert_eq!(AffineMatrix::default(), AffineMatrix::identity());
    }

    #[test]
    fn rotation_is_counter_clockwise_on_screen() {
        let m = AffineMatrix::from_rotation(90.0);
        assert_point_eq(m.apply(Point2d::new(1.0, 0.0)), Point2d::new(0.0, -1.0));
        assert_point_eq(m.apply(Point2d::new(0.0, 1.0)), Point2d::new(1.0, 0.0));
    }

    #[test]
    fn translate_then_rotate_differs_from_rotate_then_translate() {
        let t = AffineMatrix::from_translation(10.0, 0.0);
        let r = AffineMatrix::from_rotation(90.0);
        let p = Point2d::new(0.0, 0.0);

        // translate to (10, 0), then rotate to (0, -10)
        assert_point_eq(t.compose(&r).apply(p), Point2d::new(0.0, -10.0));
        // rotate keeps the origin, then translate to (10, 0)
        assert_point_eq(r.compose(&t).apply(p), Point2d::new(10.0, 0.0));
    }

    #[test]
    fn compose_is_associative() {
        let a = AffineMatrix::from_translation(1.5, -3.0);
        let b = AffineMatrix::from_rotation(-27.0);
        let c = AffineMatrix::from_scale(2.0, 0.5);
        let p = Point2d::new(7.0, 11.0);
        assert_point_eq((a * b * c).apply(p), (a * (b * c)).apply(p));
        assert_point_eq((a * b * c).apply(p), c.apply(b.apply(a.apply(p))));
    }

    #[test]
    fn last_column_is_preserved() {
        let m = AffineMatrix::from_translation(3.0, 4.0)
            * AffineMatrix::from_rotation(71.0)
            * AffineMatrix::from_scale(0.3, 8.0);
        assert_eq!([m.data[2], m.data[5], m.data[8]], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn inverse_undoes_transform() {
        let m = AffineMatrix::from_translation(-5.0, 2.0)
            * AffineMatrix::from_rotation(12.5)
            * AffineMatrix::from_scale(2.0, 3.0);
        let m_inv = m.inverse().expect("invertible");
        let p = Point2d::new(13.0, -4.0);
        assert_point_eq(m_inv.apply(m.apply(p)), p);
        assert_point_eq(m.compose(&m_inv).apply(p), p);
    }

    #[test]
    fn inverse_of_singular_is_none() {
        assert!(AffineMatrix::from_scale(0.0, 1.0).inverse().is_none());
    }
}
