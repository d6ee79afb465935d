/// Analysis layer: the derived tables behind every chart.
///
/// All functions here are pure: they read loaded rows and return fresh
/// results, so each frame recomputes exactly what the visible page needs.
pub mod aggregate;
pub mod cluster;
pub mod forecast;
