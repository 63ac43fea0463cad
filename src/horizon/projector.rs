use serde::Serialize;

use crate::predict::PassRecord;

/// Radius of the horizon ring, in degrees of zenith distance
pub const HORIZON_RADIUS: f64 = 90.0;

/// A look direction from the observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPoint {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

impl SkyPoint {
    pub fn new(azimuth_deg: f64, elevation_deg: f64) -> Self {
        Self {
            azimuth_deg,
            elevation_deg,
        }
    }
}

/// Plot coordinates: `theta` in radians, `radius` as zenith distance in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarPoint {
    pub theta: f64,
    pub radius: f64,
}

impl PolarPoint {
    /// Cartesian position on a unit-less plot where the horizon ring has radius 90.
    /// Only meaningful for `AxisMode::PreRotated` angles.
    pub fn to_cartesian(&self) -> (f64, f64) {
        (self.radius * self.theta.cos(), self.radius * self.theta.sin())
    }
}

/// How `theta` is expressed.
///
/// Compass azimuth runs clockwise from north. `RendererConfigured` emits the
/// azimuth in radians unchanged; the polar renderer must then run clockwise
/// with zero rotated 90° to the top. `PreRotated` emits the standard
/// counter-clockwise-from-east angle for renderers without axis settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisMode {
    #[default]
    RendererConfigured,
    PreRotated,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HorizonProjector {
    pub mode: AxisMode,
}

impl HorizonProjector {
    pub fn new(mode: AxisMode) -> Self {
        Self { mode }
    }

    pub fn project_point(&self, point: SkyPoint) -> PolarPoint {
        let theta = match self.mode {
            AxisMode::RendererConfigured => point.azimuth_deg.to_radians(),
            AxisMode::PreRotated => (90.0 - point.azimuth_deg).rem_euclid(360.0).to_radians(),
        };
        PolarPoint {
            theta,
            radius: zenith_distance(point.elevation_deg),
        }
    }

    /// One output point per input point, in order.
    pub fn project(&self, points: &[SkyPoint]) -> Vec<PolarPoint> {
        points.iter().map(|p| self.project_point(*p)).collect()
    }

    /// Start, peak and end of a pass
    pub fn project_pass(&self, record: &PassRecord) -> Vec<PolarPoint> {
        let points: Vec<SkyPoint> = record
            .track()
            .iter()
            .map(|&(az, el)| SkyPoint::new(az, el))
            .collect();
        self.project(&points)
    }
}

/// Zenith maps to 0, the horizon and anything below it to 90.
fn zenith_distance(elevation_deg: f64) -> f64 {
    if !elevation_deg.is_finite() {
        return HORIZON_RADIUS;
    }
    (HORIZON_RADIUS - elevation_deg).clamp(0.0, HORIZON_RADIUS)
}
