//! # Steady-state coverage solver
//!
//! Finds (θ_O, θ_N) zeroing the two balance equations of the rate law for a single
//! operating point, then derives recombination coefficients and packages a [`ResultRow`].
//!
//! ## Main pieces
//! - **`SolverConfig`**: tolerances on the scaled residual and on the Newton step, iteration
//!   cap, line-search damping, backend choice and strict mode. Serializable, so it can sit
//!   in a task file.
//! - **`RootFinder`** trait with two backends dispatched through `RootFinderKind`:
//!   - `DampedNewton`: Newton iteration on the dimensionless balance with the analytic
//!     Jacobian and a backtracking line search (default);
//!   - `SymbolicNewton`: the same system built as symbolic expressions and handed to the
//!     RustedSciThe Newton-Raphson solver.
//!
//!   `DampedNewton` is the default because the RustedSciThe `NR` solver stops on its own
//!   residual test and does not hand back its iteration count or residual history, while
//!   rows report both and are judged on the scaled residual and step size below.
//! - **`solve_point`** / **`solve_point_with`**: the per-point entry points.
//!
//! ## Conventions
//! - every solve starts from (0.5, 0.5);
//! - no bounds are imposed on θ during the iteration;
//! - convergence needs both max |eq_i / S_i| <= `tolerance`, where S_i is
//!   [`RateCoefficients::balance_scale`], and a last Newton step with max |dθ| <=
//!   `step_tolerance`. The residual test alone stops at θ ~ sqrt(tolerance) next to a double
//!   root (p = 0, where every loss term is quadratic). `SymbolicNewton` gets the residual
//!   test only. Raw residuals (flux units) are reported too;
//! - failure to converge is not an error unless `strict` is set: the row carries the last
//!   iterate, its residual and a quality flag.
use crate::SteadyState::results::{Quality, ResultRow};
use crate::SteadyState::symbolic_solver::SymbolicNewton;
use crate::SurfaceKinetics::parameters::ParameterSet;
use crate::SurfaceKinetics::rate_law::{CoverageState, Gammas, OperatingPoint, RateCoefficients};
use crate::errors::SurfaceError;
use enum_dispatch::enum_dispatch;
use log::{debug, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Numerical backend used for the root-find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverMethod {
    #[default]
    Newton,
    SymbolicNewton,
}

impl SolverMethod {
    pub fn root_finder(&self) -> RootFinderKind {
        match self {
            SolverMethod::Newton => RootFinderKind::DampedNewton(DampedNewton),
            SolverMethod::SymbolicNewton => RootFinderKind::SymbolicNewton(SymbolicNewton),
        }
    }
}

/// Settings of the per-point root-find.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// convergence threshold on the max-norm of the scaled residual
    pub tolerance: f64,
    /// convergence threshold on max |dθ| of the last Newton step
    pub step_tolerance: f64,
    pub max_iterations: usize,
    /// backtracking line search on the residual norm
    pub damping: bool,
    /// smallest step fraction tried by the line search
    pub min_step: f64,
    pub method: SolverMethod,
    /// turn non-convergence and unphysical solutions into per-point errors
    pub strict: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            step_tolerance: 1e-12,
            max_iterations: 100,
            damping: true,
            min_step: 1e-4,
            method: SolverMethod::Newton,
            strict: false,
        }
    }
}

impl SolverConfig {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SurfaceError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SurfaceError::InvalidParameter(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.step_tolerance.is_finite() && self.step_tolerance > 0.0) {
            return Err(SurfaceError::InvalidParameter(format!(
                "step tolerance must be positive, got {}",
                self.step_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SurfaceError::InvalidParameter(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if !(self.min_step > 0.0 && self.min_step <= 1.0) {
            return Err(SurfaceError::InvalidParameter(format!(
                "min_step must lie in (0, 1], got {}",
                self.min_step
            )));
        }
        Ok(())
    }
}

/// How the root-find ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Converged,
    MaxIterations,
    SingularJacobian,
    NonFinite,
}

impl SolveStatus {
    pub fn name(&self) -> &str {
        match self {
            SolveStatus::Converged => "converged",
            SolveStatus::MaxIterations => "max_iterations",
            SolveStatus::SingularJacobian => "singular_jacobian",
            SolveStatus::NonFinite => "non_finite",
        }
    }
}

/// Outcome of a root-find: last iterate and how good it is.
#[derive(Debug, Clone, PartialEq)]
pub struct RootReport {
    pub state: CoverageState,
    pub scaled_residual: Vector2<f64>,
    /// Newton steps taken; `None` when the backend does not report it
    pub iterations: Option<usize>,
    pub status: SolveStatus,
    /// max-norm of the scaled residual before each step
    pub residual_history: Vec<f64>,
}

impl RootReport {
    pub fn residual_norm(&self) -> f64 {
        self.scaled_residual.amax()
    }
}

#[enum_dispatch]
pub trait RootFinder {
    fn find_root(
        &self,
        rc: &RateCoefficients,
        guess: CoverageState,
        config: &SolverConfig,
    ) -> Result<RootReport, SurfaceError>;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
#[enum_dispatch(RootFinder)]
pub enum RootFinderKind {
    DampedNewton(DampedNewton),
    SymbolicNewton(SymbolicNewton),
}

/// Newton-Raphson on the scaled balance with an optional backtracking line search.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampedNewton;

impl RootFinder for DampedNewton {
    fn find_root(
        &self,
        rc: &RateCoefficients,
        guess: CoverageState,
        config: &SolverConfig,
    ) -> Result<RootReport, SurfaceError> {
        let mut x = guess.as_vector();
        let mut F = rc.scaled_residual(&guess);
        let mut history = Vec::with_capacity(config.max_iterations + 1);
        // no step taken yet
        let mut last_step = f64::INFINITY;
        let report = |x: Vector2<f64>, F: Vector2<f64>, it, status, history| RootReport {
            state: CoverageState::from_vector(&x),
            scaled_residual: F,
            iterations: Some(it),
            status,
            residual_history: history,
        };

        for it in 0..=config.max_iterations {
            let norm = F.amax();
            history.push(norm);
            if !(norm.is_finite() && x.iter().all(|v| v.is_finite())) {
                return Ok(report(x, F, it, SolveStatus::NonFinite, history));
            }
            if norm <= config.tolerance && last_step <= config.step_tolerance {
                return Ok(report(x, F, it, SolveStatus::Converged, history));
            }
            if it == config.max_iterations {
                break;
            }

            let state = CoverageState::from_vector(&x);
            let J = rc.scaled_jacobian(&state);
            let Some(dx) = J.lu().solve(&(-F)) else {
                return Ok(report(x, F, it, SolveStatus::SingularJacobian, history));
            };

            let mut lambda = 1.0;
            let norm0 = F.norm();
            loop {
                let trial = x + dx * lambda;
                let F_trial = rc.scaled_residual(&CoverageState::from_vector(&trial));
                let accepted = !config.damping
                    || F_trial.norm() <= (1.0 - 1e-4 * lambda) * norm0
                    || lambda <= config.min_step;
                if accepted {
                    last_step = (trial - x).amax();
                    x = trial;
                    F = F_trial;
                    break;
                }
                lambda *= 0.5;
            }
        }
        Ok(report(
            x,
            F,
            config.max_iterations,
            SolveStatus::MaxIterations,
            history,
        ))
    }

    fn name(&self) -> &str {
        "damped Newton"
    }
}

fn assess(state: &CoverageState, gammas: &Gammas, status: SolveStatus) -> Quality {
    if status != SolveStatus::Converged {
        Quality::NotConverged
    } else if !state.is_physical() || gammas.any_negative() {
        Quality::Unphysical
    } else if gammas.any_undefined() {
        Quality::Undefined
    } else {
        Quality::Ok
    }
}

/// Solves one operating point with default settings.
#[allow(non_snake_case)]
pub fn solve_point(
    params: &ParameterSet,
    T: f64,
    p: f64,
    mole_fraction_override: Option<f64>,
) -> Result<ResultRow, SurfaceError> {
    let point = OperatingPoint {
        T,
        p,
        C_O: mole_fraction_override,
    };
    solve_point_with(params, &point, &SolverConfig::default())
}

/// Solves one operating point: rate coefficients, root-find from (0.5, 0.5), post-processing.
pub fn solve_point_with(
    params: &ParameterSet,
    point: &OperatingPoint,
    config: &SolverConfig,
) -> Result<ResultRow, SurfaceError> {
    config.validate()?;
    let rc = RateCoefficients::new(params, point)?;
    let finder = config.method.root_finder();
    let report = finder.find_root(&rc, CoverageState::initial_guess(), config)?;

    let state = report.state;
    let fluxes = rc.fluxes(&state);
    let gammas = rc.gammas(&fluxes);
    let residual = rc.residual(&state);
    let quality = assess(&state, &gammas, report.status);
    debug!(
        "T = {} K, p = {} Pa: {} {} after {:?} iterations, theta = ({}, {}), residual {:e}",
        point.T,
        point.p,
        finder.name(),
        report.status.name(),
        report.iterations,
        state.theta_O,
        state.theta_N,
        report.residual_norm()
    );

    match quality {
        Quality::NotConverged => {
            if config.strict {
                return Err(SurfaceError::NonConvergence {
                    T: point.T,
                    p: point.p,
                    residual: report.residual_norm(),
                    iterations: report.iterations.unwrap_or(config.max_iterations),
                });
            }
            warn!(
                "no convergence at T = {} K, p = {} Pa ({}), scaled residual {:e}",
                point.T,
                point.p,
                report.status.name(),
                report.residual_norm()
            );
        }
        Quality::Unphysical => {
            if config.strict {
                return Err(SurfaceError::UnphysicalSolution {
                    T: point.T,
                    p: point.p,
                    theta_O: state.theta_O,
                    theta_N: state.theta_N,
                });
            }
            warn!(
                "unphysical steady state at T = {} K, p = {} Pa: theta = ({}, {})",
                point.T, point.p, state.theta_O, state.theta_N
            );
        }
        Quality::Undefined | Quality::Ok => {}
    }

    Ok(ResultRow::new(
        &rc, state, fluxes, gammas, residual, &report, quality,
    ))
}
