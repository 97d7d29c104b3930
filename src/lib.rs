//! # SurfKin
//!
//! Steady-state coverage of O and N atoms on a catalytic wall and the resulting
//! recombination coefficients.
//!
//! Adsorption from the gas, Eley-Rideal and Langmuir-Hinshelwood recombination and thermal
//! desorption are balanced for each species; the two balance equations are solved for
//! (θ_O, θ_N) at every (T, p) of a sweep, and the gamma coefficients follow from the fluxes
//! at steady state.
//!
//! - [`SurfaceKinetics`]: parameter sets and the rate law;
//! - [`SteadyState`]: root finders, per-point solve, sweeps and result tables;
//! - [`Utils`]: task files and free-stream gas helpers.
//!
//! ```no_run
//! use SurfKin::SurfaceKinetics::parameters::ParameterSet;
//! use SurfKin::SteadyState::sweep::run_sweep;
//!
//! let params = ParameterSet::reference();
//! let table = run_sweep(&params, &[300.0, 1000.0, 2500.0], &[10.0, 1100.0]);
//! table.pretty_print();
//! ```
#[allow(non_snake_case)]
pub mod SteadyState;
#[allow(non_snake_case)]
pub mod SurfaceKinetics;
#[allow(non_snake_case)]
pub mod Utils;
#[allow(non_snake_case)]
pub mod errors;
