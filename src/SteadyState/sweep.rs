//! # Sweep engine
//!
//! Runs the steady-state solve over the Cartesian product of temperatures and pressures,
//! optionally repeated for several O mole fractions. Points are independent: every one
//! starts from (0.5, 0.5) and nothing is carried from one point to the next, so the sweep
//! can run on a rayon pool. Rows land in the table in sweep-index order either way.
//!
//! ## Ordering
//! Mole-fraction scenarios form the outermost loop. Inside a scenario:
//! - `SweepOrder::TemperatureOuter` (default): T outer, p inner;
//! - `SweepOrder::PressureOuter`: p outer, T inner.
use crate::SteadyState::results::ResultTable;
use crate::SteadyState::solver::{SolverConfig, solve_point_with};
use crate::SurfaceKinetics::parameters::ParameterSet;
use crate::SurfaceKinetics::rate_law::OperatingPoint;
use crate::errors::SurfaceError;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepOrder {
    #[default]
    TemperatureOuter,
    PressureOuter,
}

/// What to sweep and how to solve each point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub temperatures: Vec<f64>,
    pub pressures: Vec<f64>,
    /// O mole fraction scenarios; empty means the parameter set composition only
    pub mole_fractions: Vec<f64>,
    pub order: SweepOrder,
    pub solver: SolverConfig,
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            temperatures: Vec::new(),
            pressures: Vec::new(),
            mole_fractions: Vec::new(),
            order: SweepOrder::TemperatureOuter,
            solver: SolverConfig::default(),
            parallel: false,
        }
    }
}

impl SweepConfig {
    pub fn new(temperatures: Vec<f64>, pressures: Vec<f64>) -> Self {
        Self {
            temperatures,
            pressures,
            ..Self::default()
        }
    }

    /// Operating points in sweep order.
    pub fn operating_points(&self) -> Vec<OperatingPoint> {
        let scenarios: Vec<Option<f64>> = if self.mole_fractions.is_empty() {
            vec![None]
        } else {
            self.mole_fractions.iter().map(|c| Some(*c)).collect()
        };
        let mut points =
            Vec::with_capacity(scenarios.len() * self.temperatures.len() * self.pressures.len());
        for C_O in scenarios {
            match self.order {
                SweepOrder::TemperatureOuter => {
                    for &T in &self.temperatures {
                        for &p in &self.pressures {
                            points.push(OperatingPoint { T, p, C_O });
                        }
                    }
                }
                SweepOrder::PressureOuter => {
                    for &p in &self.pressures {
                        for &T in &self.temperatures {
                            points.push(OperatingPoint { T, p, C_O });
                        }
                    }
                }
            }
        }
        points
    }
}

/// A point that produced no row.
#[derive(Debug)]
pub struct SweepFailure {
    /// position of the point in sweep order
    pub index: usize,
    pub point: OperatingPoint,
    pub error: SurfaceError,
}

/// Rows of the successful points plus the failures, both in sweep order.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub table: ResultTable,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Solves every point of `config`. A failing point is recorded and the sweep goes on.
pub fn run_sweep_with(
    params: &ParameterSet,
    config: &SweepConfig,
) -> Result<SweepReport, SurfaceError> {
    config.solver.validate()?;
    let points = config.operating_points();
    info!(
        "sweep of {} points ({} temperatures x {} pressures x {} compositions), parameters '{}'",
        points.len(),
        config.temperatures.len(),
        config.pressures.len(),
        config.mole_fractions.len().max(1),
        params.version()
    );

    let solve = |point: &OperatingPoint| solve_point_with(params, point, &config.solver);
    let outcomes: Vec<_> = if config.parallel {
        points.par_iter().map(solve).collect()
    } else {
        points.iter().map(solve).collect()
    };

    let mut report = SweepReport::default();
    for (index, (point, outcome)) in points.into_iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(row) => report.table.push(row),
            Err(error) => {
                warn!("point {} skipped: {}", index, error);
                report.failures.push(SweepFailure {
                    index,
                    point,
                    error,
                });
            }
        }
    }
    let degraded = report.table.degraded().len();
    info!(
        "sweep finished: {} rows, {} degraded, {} failed",
        report.table.len(),
        degraded,
        report.failures.len()
    );
    Ok(report)
}

/// Temperature-outer, pressure-inner sweep with default solver settings.
///
/// Invalid points are logged and left out of the table; use [`run_sweep_with`] to get them
/// back as failures.
pub fn run_sweep(params: &ParameterSet, temperatures: &[f64], pressures: &[f64]) -> ResultTable {
    let config = SweepConfig::new(temperatures.to_vec(), pressures.to_vec());
    match run_sweep_with(params, &config) {
        Ok(report) => report.table,
        // default solver settings always validate
        Err(_) => ResultTable::new(),
    }
}
