use crate::operations::extrusion::connector::ContourConnector;
use crate::tessellation::{MultipleContourTriangulation, SingleContourTriangulation};
use crate::texture::alteration::UvAlteration;

/// Numerical constants used throughout the extrusion pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    /// Extrusion amounts with `|amount| <= min_extrusion_exclusive` produce
    /// an empty mesh.
    pub min_extrusion_exclusive: f64,
    /// Relative epsilon for comparisons scaled by the extrusion amount.
    pub extrusion_epsilon_fraction: f64,
    /// Parameter gap inserted between consecutive parts of the outline.
    pub parameter_gap: f64,
    /// Minimum point count of an end cap (kept odd).
    pub cap_min_points: usize,
    /// Angular resolution of convex corner fans, in degrees.
    pub fan_min_angle_deg: f64,
    /// Distance below which neighbouring connected-segment points coincide.
    pub connected_distance_epsilon: f64,
    /// `u` difference below which neighbouring connected-segment points coincide.
    pub connected_u_epsilon: f64,
    pub spring_max_iterations: usize,
    pub spring_epsilon: f64,
    pub spring_gain: f64,
    /// Gaussian width of the convolution alteration relative to `|amount|`.
    pub convolution_width_fraction: f64,
    /// Minimum triangle angle enforced when refining multi-contour meshes.
    pub min_triangle_angle_deg: f64,
    /// Curvature prominence of a local maximum, in degrees.
    pub local_maxima_delta_deg: f64,
    /// Curvature cutoff separating rising and falling runs, in degrees.
    pub rise_and_fall_cutoff_deg: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            min_extrusion_exclusive: 0.0,
            extrusion_epsilon_fraction: 5e-7,
            parameter_gap: 0.1,
            cap_min_points: 5,
            fan_min_angle_deg: 5.0,
            connected_distance_epsilon: 1e-5,
            connected_u_epsilon: 1e-5,
            spring_max_iterations: 1000,
            spring_epsilon: 1e-6,
            spring_gain: 0.05,
            convolution_width_fraction: 1.0,
            min_triangle_angle_deg: 25.0,
            local_maxima_delta_deg: 15.0,
            rise_and_fall_cutoff_deg: 3.0,
        }
    }
}

impl Precision {
    /// Absolute epsilon for an extrusion of `amount`.
    #[must_use]
    pub fn extrusion_epsilon(&self, amount: f64) -> f64 {
        (amount * self.extrusion_epsilon_fraction).abs()
    }
}

/// Parameters of one extrusion run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionConfig {
    /// Signed offset distance; positive extrudes to the left of the line.
    pub extrusion_amount: f64,
    pub contour_connector: ContourConnector,
    pub single_contour_triangulation: SingleContourTriangulation,
    pub multiple_contour_triangulation: MultipleContourTriangulation,
    pub single_contour_uv_alteration: UvAlteration,
    pub multiple_contour_uv_alteration: UvAlteration,
    pub precision: Precision,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            extrusion_amount: 0.1,
            contour_connector: ContourConnector::default(),
            single_contour_triangulation: SingleContourTriangulation::default(),
            multiple_contour_triangulation: MultipleContourTriangulation::default(),
            single_contour_uv_alteration: UvAlteration::default(),
            multiple_contour_uv_alteration: UvAlteration::default(),
            precision: Precision::default(),
        }
    }
}

impl ExtrusionConfig {
    /// Default configuration with the given extrusion amount.
    #[must_use]
    pub fn new(extrusion_amount: f64) -> Self {
        Self {
            extrusion_amount,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_contour_connector(mut self, connector: ContourConnector) -> Self {
        self.contour_connector = connector;
        self
    }

    #[must_use]
    pub fn with_single_contour_triangulation(mut self, t: SingleContourTriangulation) -> Self {
        self.single_contour_triangulation = t;
        self
    }

    #[must_use]
    pub fn with_multiple_contour_triangulation(
        mut self,
        t: MultipleContourTriangulation,
    ) -> Self {
        self.multiple_contour_triangulation = t;
        self
    }

    #[must_use]
    pub fn with_single_contour_uv_alteration(mut self, alteration: UvAlteration) -> Self {
        self.single_contour_uv_alteration = alteration;
        self
    }

    #[must_use]
    pub fn with_multiple_contour_uv_alteration(mut self, alteration: UvAlteration) -> Self {
        self.multiple_contour_uv_alteration = alteration;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// UV alteration applied when the extrusion yields `contour_count` contours.
    #[must_use]
    pub fn uv_alteration_for(&self, contour_count: usize) -> UvAlteration {
        if contour_count > 1 {
            self.multiple_contour_uv_alteration
        } else {
            self.single_contour_uv_alteration
        }
    }

    /// Whether the triangulation chosen for `contour_count` contours consumes
    /// altered UVs.
    #[must_use]
    pub fn alters_uvs_for(&self, contour_count: usize) -> bool {
        if contour_count > 1 {
            self.multiple_contour_triangulation.has_uv_alteration()
        } else {
            self.single_contour_triangulation.has_uv_alteration()
        }
    }
}
