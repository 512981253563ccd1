/// Output layer: chart rendering and the optional viewer step.

pub mod display;
pub mod plot;
