use crate::math::{Point2, Vector2};

/// Anything with a 2D position.
pub trait Positioned {
    fn position(&self) -> Point2;
}

/// Anything carrying texture coordinates.
pub trait Textured {
    fn uv(&self) -> Vector2;
}

/// A point of the source polyline with its arclength-like parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub parameter: f64,
    pub position: Point2,
}

impl LinePoint {
    #[must_use]
    pub fn new(parameter: f64, position: Point2) -> Self {
        Self {
            parameter,
            position,
        }
    }
}

/// A source polyline point with texture coordinates.
///
/// `u` starts as the cumulative arclength, `v` as 0.5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePointUv {
    pub parameter: f64,
    pub position: Point2,
    pub uv: Vector2,
}

impl LinePointUv {
    #[must_use]
    pub fn new(parameter: f64, position: Point2, uv: Vector2) -> Self {
        Self {
            parameter,
            position,
            uv,
        }
    }

    /// Interpolates all fields toward `other` by `fraction`.
    #[must_use]
    pub fn average_with(&self, other: &Self, fraction: f64) -> Self {
        Self {
            parameter: lerp(self.parameter, other.parameter, fraction),
            position: self.position + (other.position - self.position) * fraction,
            uv: self.uv + (other.uv - self.uv) * fraction,
        }
    }

    /// Same point with a different parameter.
    #[must_use]
    pub fn with_parameter(self, parameter: f64) -> Self {
        Self { parameter, ..self }
    }
}

/// A point of the extruded outline.
///
/// The segment indices reference the source polyline segments the point was
/// generated from; fan and miter points reference both neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudedPoint {
    pub parameter: f64,
    pub position: Point2,
    pub uv: Vector2,
    pub segment_index: usize,
    pub segment_index_2: usize,
}

impl ExtrudedPoint {
    /// Offsets a source point along `normal` by `amount`, keeping its UV.
    #[must_use]
    pub fn offset(
        source: &LinePointUv,
        parameter: f64,
        normal: &Vector2,
        amount: f64,
        segment_index: usize,
    ) -> Self {
        Self {
            parameter,
            position: source.position + normal * amount,
            uv: source.uv,
            segment_index,
            segment_index_2: segment_index,
        }
    }

    /// Linear interpolation of parameter, position and UV. Indices are
    /// taken from `self`.
    #[must_use]
    pub fn lerp(&self, other: &Self, fraction: f64) -> Self {
        Self {
            parameter: lerp(self.parameter, other.parameter, fraction),
            position: self.position + (other.position - self.position) * fraction,
            uv: self.uv + (other.uv - self.uv) * fraction,
            ..*self
        }
    }
}

/// A self-intersection of the extruded outline.
///
/// `first_*` indices belong to the crossing segment this point lies on,
/// `second_*` to the segment it crosses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    pub parameter: f64,
    pub position: Point2,
    pub uv: Vector2,
    pub first_segment_index: usize,
    pub first_segment_index_2: usize,
    pub second_segment_index: usize,
    pub second_segment_index_2: usize,
}

impl IntersectionPoint {
    /// Intersection at `point` with own segment indices `own` and the crossed
    /// segment's indices `other`.
    #[must_use]
    pub fn new(point: &ExtrudedPoint, own: (usize, usize), other: (usize, usize)) -> Self {
        Self {
            parameter: point.parameter,
            position: point.position,
            uv: point.uv,
            first_segment_index: own.0,
            first_segment_index_2: own.1,
            second_segment_index: other.0,
            second_segment_index_2: other.1,
        }
    }

    /// Synthetic intersection standing in for an outline endpoint.
    #[must_use]
    pub fn from_extruded(point: &ExtrudedPoint) -> Self {
        let indices = (point.segment_index, point.segment_index_2);
        Self::new(point, indices, indices)
    }
}

/// A point of a final contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    pub position: Point2,
    pub uv: Vector2,
}

impl ContourPoint {
    #[must_use]
    pub fn new(position: Point2, uv: Vector2) -> Self {
        Self { position, uv }
    }

    /// Interpolates position and UV toward `other` by `fraction`.
    #[must_use]
    pub fn average_with(&self, other: &Self, fraction: f64) -> Self {
        Self {
            position: self.position + (other.position - self.position) * fraction,
            uv: self.uv + (other.uv - self.uv) * fraction,
        }
    }
}

impl From<ExtrudedPoint> for ContourPoint {
    fn from(p: ExtrudedPoint) -> Self {
        Self::new(p.position, p.uv)
    }
}

impl From<IntersectionPoint> for ContourPoint {
    fn from(p: IntersectionPoint) -> Self {
        Self::new(p.position, p.uv)
    }
}

impl From<LinePointUv> for ContourPoint {
    fn from(p: LinePointUv) -> Self {
        Self::new(p.position, p.uv)
    }
}

macro_rules! impl_point_traits {
    ($($ty:ty),*) => {
        $(
            impl Positioned for $ty {
                fn position(&self) -> Point2 {
                    self.position
                }
            }
        )*
    };
}

impl_point_traits!(LinePoint, LinePointUv, ExtrudedPoint, IntersectionPoint, ContourPoint);

impl Textured for LinePointUv {
    fn uv(&self) -> Vector2 {
        self.uv
    }
}

impl Textured for ExtrudedPoint {
    fn uv(&self) -> Vector2 {
        self.uv
    }
}

impl Textured for ContourPoint {
    fn uv(&self) -> Vector2 {
        self.uv
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn uv_point(parameter: f64, x: f64, u: f64) -> LinePointUv {
        LinePointUv::new(parameter, Point2::new(x, 0.0), Vector2::new(u, 0.5))
    }

    #[test]
    fn average_is_linear_in_all_fields() {
        let a = uv_point(0.0, 0.0, 0.0);
        let b = uv_point(1.0, 2.0, 4.0);
        let m = a.average_with(&b, 0.25);
        assert!((m.parameter - 0.25).abs() < TOL);
        assert!((m.position.x - 0.5).abs() < TOL);
        assert!((m.uv.x - 1.0).abs() < TOL);
        assert!((m.uv.y - 0.5).abs() < TOL);
    }

    #[test]
    fn offset_keeps_uv_and_distance() {
        let src = uv_point(0.3, 1.0, 1.0);
        let p = ExtrudedPoint::offset(&src, 7.0, &Vector2::new(0.0, 1.0), -0.5, 3);
        assert!(((p.position - src.position).norm() - 0.5).abs() < TOL);
        assert!((p.position.y + 0.5).abs() < TOL);
        assert_eq!(p.uv, src.uv);
        assert_eq!((p.segment_index, p.segment_index_2), (3, 3));
        assert!((p.parameter - 7.0).abs() < TOL);
    }

    #[test]
    fn synthetic_intersection_copies_indices() {
        let src = uv_point(0.0, 0.0, 0.0);
        let mut p = ExtrudedPoint::offset(&src, 0.0, &Vector2::new(0.0, 1.0), 1.0, 2);
        p.segment_index_2 = 1;
        let ip = IntersectionPoint::from_extruded(&p);
        assert_eq!(ip.first_segment_index, 2);
        assert_eq!(ip.first_segment_index_2, 1);
        assert_eq!(ip.second_segment_index, 2);
        assert_eq!(ip.second_segment_index_2, 1);
        assert_eq!(ContourPoint::from(ip), ContourPoint::from(p));
    }

    #[test]
    fn averaging_copies_do_not_alias() {
        let a = ContourPoint::new(Point2::new(0.0, 0.0), Vector2::new(0.0, 0.0));
        let b = ContourPoint::new(Point2::new(2.0, 0.0), Vector2::new(2.0, 1.0));
        let m = a.average_with(&b, 0.5);
        assert!((m.uv.x - 1.0).abs() < TOL);
        assert!(a.uv.x.abs() < TOL);
    }
}
