/// Free-stream gas helpers: mixture properties, Mach number, unit conversion, grids.
#[allow(non_snake_case)]
pub mod gas_mixture;
/// JSON task files describing a sweep.
#[allow(non_snake_case)]
pub mod task_loader;
