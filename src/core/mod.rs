// Shared low-level helpers

pub mod math;
