use serde::Serialize;

use crate::horizon::projector::{HorizonProjector, PolarPoint, HORIZON_RADIUS};
use crate::predict::PassRecord;

const RADIAL_TICK_STEP: u32 = 10;

/// A labelled point of a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub at: PolarPoint,
}

/// One pass drawn on the horizon plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotTrace {
    pub points: Vec<PolarPoint>,
    pub annotations: Vec<Annotation>,
}

/// Everything a polar renderer needs to draw the selected passes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonPlot {
    pub title: String,
    pub traces: Vec<PlotTrace>,
    /// (radius, label) pairs; labels show elevation so the center reads 90
    pub radial_ticks: Vec<(f64, String)>,
}

impl HorizonPlot {
    pub fn build(satellite_name: &str, passes: &[&PassRecord], projector: &HorizonProjector) -> Self {
        let traces = passes
            .iter()
            .map(|record| {
                let points = projector.project_pass(record);
                let annotations = vec![
                    Annotation {
                        text: format!("Start: {}", record.start_compass),
                        at: points[0],
                    },
                    Annotation {
                        text: format!("End: {}", record.end_compass),
                        at: points[points.len() - 1],
                    },
                ];
                PlotTrace {
                    points,
                    annotations,
                }
            })
            .collect();

        Self {
            title: format!("{} Pass Path", satellite_name),
            traces,
            radial_ticks: radial_ticks(),
        }
    }

    /// Release the plot before a new one takes its slot.
    pub fn teardown(self) {
        log::debug!(
            "Tearing down plot '{}' ({} traces)",
            self.title,
            self.traces.len()
        );
    }
}

fn radial_ticks() -> Vec<(f64, String)> {
    let max = HORIZON_RADIUS as u32;
    (0..=max)
        .step_by(RADIAL_TICK_STEP as usize)
        .map(|r| (r as f64, (max - r).to_string()))
        .collect()
}
