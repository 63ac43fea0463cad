mod plot;
mod projector;

pub use plot::{Annotation, HorizonPlot, PlotTrace};
pub use projector::{AxisMode, HorizonProjector, PolarPoint, SkyPoint, HORIZON_RADIUS};
