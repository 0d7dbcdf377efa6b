pub mod connector;
mod filter;
mod raw_offset;
pub mod results;
mod self_intersect;
mod slice;
mod stitch;

use tracing::debug;

use crate::config::ExtrusionConfig;
use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{LinePoint, SegmentwiseList};
use crate::operations::segmentation::line_points_uv;

pub use connector::ContourConnector;
pub use results::LineExtrusionResults;
use results::ExtrusionParts;

/// Extrudes an open polyline by a signed distance on both sides, producing
/// closed contours free of self-intersections.
///
/// Parts of the outline that fold back closer than the extrusion distance to
/// the line are removed; they are reported separately in the results.
#[derive(Debug, Clone)]
pub struct LineExtrusion {
    points: Vec<LinePoint>,
    config: ExtrusionConfig,
}

impl LineExtrusion {
    /// Creates a new line extrusion operation.
    #[must_use]
    pub fn new(points: Vec<LinePoint>, config: ExtrusionConfig) -> Self {
        Self { points, config }
    }

    /// Executes the extrusion.
    ///
    /// Fewer than 2 points yield [`LineExtrusionResults::empty`].
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the extrusion amount is not
    /// finite or not larger in magnitude than the configured minimum, and
    /// `GeometryError::NonFinite` if any line point is not finite.
    pub fn execute(&self) -> Result<LineExtrusionResults> {
        let amount = self.config.extrusion_amount;
        let precision = &self.config.precision;
        if !amount.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "extrusion amount must be finite, got {amount}"
            ))
            .into());
        }
        if amount.abs() <= precision.min_extrusion_exclusive {
            return Err(OperationError::InvalidInput(format!(
                "extrusion amount {amount} must exceed {} in magnitude",
                precision.min_extrusion_exclusive
            ))
            .into());
        }
        for (index, p) in self.points.iter().enumerate() {
            let component = if !p.parameter.is_finite() {
                "parameter"
            } else if !p.position.x.is_finite() || !p.position.y.is_finite() {
                "position"
            } else {
                continue;
            };
            return Err(GeometryError::NonFinite { index, component }.into());
        }
        if self.points.len() < 2 {
            return Ok(LineExtrusionResults::empty());
        }

        let line = line_points_uv(&self.points);

        // Step 1: Build the raw extruded traversal around the line.
        let traversal = SegmentwiseList::new(raw_offset::build(&line, amount, precision));
        debug!(points = traversal.len(), "extruded traversal built");

        // Step 2: Find all self-intersections.
        let intersections = self_intersect::find_all(&traversal);
        debug!(
            intersections = intersections.points.len().saturating_sub(2),
            "self-intersections found"
        );

        // Step 3: Slice the traversal between intersections.
        let mut chunks = slice::build(&traversal, &intersections.chunk_endpoints);

        // Step 4: Remove chunks that fold back onto the line.
        let original = SegmentwiseList::new(line);
        let removed = filter::apply(&mut chunks, &original, amount, &intersections.points);
        debug!(kept = chunks.len(), removed = removed.len(), "chunks filtered");

        // Step 5: Stitch chunks into closed loops.
        let chunk_collections = stitch::connect(chunks);
        let removed_chunk_collections = stitch::connect(removed);

        // Step 6: Flatten loops into contours.
        let connector = self.config.contour_connector;
        let contours = connector.connect(&chunk_collections);
        let removed_contours = connector.connect(&removed_chunk_collections);
        debug!(
            contours = contours.len(),
            removed_contours = removed_contours.len(),
            "contours connected"
        );

        Ok(LineExtrusionResults::new(
            ExtrusionParts {
                original,
                contours,
                removed_contours,
                chunk_collections,
                removed_chunk_collections,
                intersection_points: intersections.points,
                initial_traversal: traversal,
            },
            &self.config,
        ))
    }
}
