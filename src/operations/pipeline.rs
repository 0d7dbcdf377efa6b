//! Full pipeline from a line source to a UV-mapped ribbon mesh.

use tracing::{debug, warn};

use crate::config::ExtrusionConfig;
use crate::error::Result;
use crate::operations::extrusion::{LineExtrusion, LineExtrusionResults};
use crate::operations::segmentation::LineSource;
use crate::tessellation::{self, TriangleMesh};

/// Mesh and extrusion results of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct ExtrudedLine {
    pub mesh: TriangleMesh,
    pub results: LineExtrusionResults,
}

impl ExtrudedLine {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether at most one contour survived, so the mesh came from the
    /// single-contour triangulation.
    #[must_use]
    pub fn is_single_contour(&self) -> bool {
        self.results.contours.len() <= 1
    }
}

/// Extrudes the line of a [`LineSource`] and triangulates the outline.
///
/// Failures never propagate out of [`ExtrudeLine::execute`]: they are logged
/// and an empty mesh is returned, so a transient invalid line (for example
/// mid-edit) leaves no stale geometry behind.
#[derive(Debug, Clone)]
pub struct ExtrudeLine<S> {
    source: S,
    config: ExtrusionConfig,
}

impl<S: LineSource> ExtrudeLine<S> {
    /// Creates a new pipeline run.
    #[must_use]
    pub fn new(source: S, config: ExtrusionConfig) -> Self {
        Self { source, config }
    }

    /// Runs the pipeline, returning an empty result on any failure.
    ///
    /// Extrusion amounts not larger in magnitude than
    /// `precision.min_extrusion_exclusive` skip the pipeline entirely.
    #[must_use]
    pub fn execute(&self) -> ExtrudedLine {
        let amount = self.config.extrusion_amount;
        if amount.abs() <= self.config.precision.min_extrusion_exclusive {
            debug!(amount, "extrusion amount too small, skipping");
            return ExtrudedLine::empty();
        }
        match self.try_execute() {
            Ok(extruded) => extruded,
            Err(e) => {
                warn!(amount, error = %e, "line extrusion failed");
                ExtrudedLine::empty()
            }
        }
    }

    /// Runs the pipeline, propagating the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the extrusion or triangulation step.
    pub fn try_execute(&self) -> Result<ExtrudedLine> {
        // Step 1: Sample the line.
        let points = self.source.line_points();

        // Step 2: Extrude.
        let results = LineExtrusion::new(points, self.config).execute()?;

        // Step 3: Triangulate the surviving contours.
        let mesh = tessellation::triangulate(&results, &self.config)?;
        debug!(
            contours = results.contours.len(),
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "line extruded"
        );

        Ok(ExtrudedLine { mesh, results })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Precision;
    use crate::math::Point2;
    use crate::operations::segmentation::{Polyline, ResampledPolyline};
    use crate::tessellation::{MultipleContourTriangulation, SingleContourTriangulation};

    fn polyline(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn straight() -> Polyline {
        polyline(&[(0.0, 0.0), (0.25, 0.0), (0.5, 0.0), (0.75, 0.0), (1.0, 0.0)])
    }

    /// Square loop whose end cap overlaps the start, enclosing a hole.
    fn square_loop() -> Polyline {
        polyline(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.2)])
    }

    // ── single contour ──

    #[test]
    fn straight_line_gives_quad_strip() {
        let out = ExtrudeLine::new(straight(), ExtrusionConfig::new(0.1)).execute();
        assert!(out.is_single_contour());
        assert_eq!(out.results.contours.len(), 1);
        assert!(out.results.removed_contours.is_empty());
        let pairs = out
            .results
            .connected_segments
            .coverage
            .as_ref()
            .unwrap()
            .increasing
            .len();
        assert_eq!(out.mesh.vertices.len(), 2 * pairs + 2);
        assert_eq!(out.mesh.uvs.len(), out.mesh.vertices.len());
    }

    #[test]
    fn straight_ribbon_area() {
        // Rectangle 1.0 x 0.2 plus two half-disc caps of radius 0.1.
        let config = ExtrusionConfig::new(0.1)
            .with_single_contour_triangulation(
                SingleContourTriangulation::WeightedFromOriginalSegments,
            );
        let out = ExtrudeLine::new(straight(), config).execute();
        let expected = 0.2 + std::f64::consts::PI * 0.01;
        assert!(out.mesh.area() <= expected + 1e-9, "area={}", out.mesh.area());
        assert!(out.mesh.area() > 0.2, "area={}", out.mesh.area());
    }

    #[test]
    fn negative_amount_extrudes_too() {
        let out = ExtrudeLine::new(straight(), ExtrusionConfig::new(-0.1)).execute();
        assert!(!out.mesh.is_empty());
        assert!((out.results.extrusion_amount + 0.1).abs() < 1e-15);
    }

    #[test]
    fn resampled_source() {
        let source =
            ResampledPolyline::new(vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)], 0.25);
        let out = ExtrudeLine::new(source, ExtrusionConfig::new(0.1)).execute();
        assert_eq!(out.results.original.len(), 9);
        assert!(!out.mesh.is_empty());
    }

    // ── multiple contours ──

    #[test]
    fn closed_loop_triangulates_around_the_hole() {
        let config = ExtrusionConfig::new(0.3)
            .with_multiple_contour_triangulation(
                MultipleContourTriangulation::WeightedFromOriginalSegments,
            );
        let out = ExtrudeLine::new(square_loop(), config).execute();
        assert!(!out.is_single_contour());
        assert!(!out.mesh.is_empty());
        // Outer square of side 4.6 minus the 3.4 hole, less the rounded corners.
        let area = out.mesh.area();
        assert!(area > 8.5 && area < 9.8, "area={area}");
        assert_eq!(out.mesh.uvs.len(), out.mesh.vertices.len());
    }

    // ── failures ──

    #[test]
    fn zero_amount_gives_empty_mesh() {
        let out = ExtrudeLine::new(straight(), ExtrusionConfig::new(0.0)).execute();
        assert!(out.mesh.is_empty());
        assert!(out.results.is_empty());
    }

    #[test]
    fn amount_below_configured_minimum_gives_empty_mesh() {
        let precision = Precision {
            min_extrusion_exclusive: 0.5,
            ..Precision::default()
        };
        let config = ExtrusionConfig::new(0.2).with_precision(precision);
        assert!(ExtrudeLine::new(straight(), config).execute().mesh.is_empty());
    }

    #[test]
    fn errors_are_caught() {
        let config = ExtrusionConfig::new(f64::NAN);
        let pipeline = ExtrudeLine::new(straight(), config);
        assert!(pipeline.try_execute().is_err());
        assert!(pipeline.execute().mesh.is_empty());
    }

    #[test]
    fn single_point_gives_empty_mesh() {
        let out = ExtrudeLine::new(polyline(&[(1.0, 1.0)]), ExtrusionConfig::new(0.1)).execute();
        assert!(out.mesh.is_empty());
    }
}
