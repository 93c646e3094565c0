/// End-to-end snapping entry points
pub mod pipeline;
/// Block-mode resampling onto a cut grid
pub mod resample;
/// Grid step estimation from profile peaks
pub mod step;
/// Edge-snapped cut placement along one axis
pub mod walker;
