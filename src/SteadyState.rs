/// Root-find of the steady-state balance at one operating point and the
/// `solve_point` entry points.
#[allow(non_snake_case)]
pub mod solver;
/// RustedSciThe Newton-Raphson backend working on the symbolic form of the balance.
#[allow(non_snake_case)]
pub mod symbolic_solver;
/// Sweeps over temperatures, pressures and mole fractions.
#[allow(non_snake_case)]
pub mod sweep;
/// `ResultRow`, `ResultTable` and their CSV / JSON / terminal output.
#[allow(non_snake_case)]
pub mod results;
