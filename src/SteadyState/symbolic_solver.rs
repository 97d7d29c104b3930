//! # Symbolic Newton backend
//!
//! The scaled balance written as RustedSciThe expressions and solved with its
//! Newton-Raphson solver. Convergence is re-checked here on the scaled residual.
use crate::SteadyState::solver::{RootFinder, RootReport, SolveStatus, SolverConfig};
use crate::SurfaceKinetics::rate_law::{CoverageState, RateCoefficients};
use crate::errors::SurfaceError;
use RustedSciThe::numerical::Nonlinear_systems::NR::NR;
use RustedSciThe::symbolic::symbolic_engine::Expr;

/// Newton-Raphson from RustedSciThe applied to the symbolic form of the scaled balance.
///
/// The per-point coefficients are folded into constants, so each equation is a quadratic
/// polynomial in theta_O and theta_N; the backend differentiates it symbolically.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicNewton;

impl RateCoefficients {
    /// Scaled balance equations as expressions in `theta_O`, `theta_N`.
    pub fn symbolic_residuals(&self) -> Vec<Expr> {
        let unknowns = Expr::Symbols("theta_O, theta_N");
        let tO = unknowns[0].clone();
        let tN = unknowns[1].clone();
        let scale = self.balance_scale();
        let (a_O, a_N) = (self.s_O * self.n_O, self.s_N * self.n_N);
        let c = |v: f64| Expr::Const(v);

        let free = 1.0 - self.theta_OH;
        let eq1 = c(a_O * free / scale[0])
            - c((a_O
                + self.gamma_star_OO * self.n_O
                + self.gamma_star_NO * self.n_N
                + self.k_des_O)
                / scale[0])
                * tO.clone()
            - c(a_O / scale[0]) * tN.clone()
            - c(self.k_LH_OO / scale[0]) * tO.clone() * tO.clone()
            - c(self.k_LH_NO / scale[0]) * tO.clone() * tN.clone();
        let eq2 = c(a_N * free / scale[1])
            - c(a_N / scale[1]) * tO.clone()
            - c((a_N
                + self.gamma_star_NN * self.n_N
                + self.gamma_star_ON * self.n_O
                + self.k_des_N)
                / scale[1])
                * tN.clone()
            - c(self.k_LH_NN / scale[1]) * tN.clone() * tN.clone()
            - c(self.k_LH_NO / scale[1]) * tO * tN;
        vec![eq1, eq2]
    }
}

impl RootFinder for SymbolicNewton {
    fn find_root(
        &self,
        rc: &RateCoefficients,
        guess: CoverageState,
        config: &SolverConfig,
    ) -> Result<RootReport, SurfaceError> {
        let unknowns = vec!["theta_O".to_string(), "theta_N".to_string()];
        let mut solver = NR::new();
        solver.set_equation_system(
            rc.symbolic_residuals(),
            Some(unknowns),
            vec![guess.theta_O, guess.theta_N],
            config.tolerance,
            config.max_iterations,
        );
        solver.set_solver_params(Some("info".to_string()), None, Some(1.0), None, None, None);
        solver.eq_generate();
        solver.solve();
        let solution = solver.get_result().ok_or_else(|| {
            SurfaceError::SolverError(format!(
                "symbolic Newton returned no solution at T = {} K, p = {} Pa",
                rc.T, rc.p
            ))
        })?;
        let solution: Vec<f64> = solution.data.into();
        let state = CoverageState::new(solution[0], solution[1]);

        // the backend does not expose its iteration count, judge the result here
        let scaled_residual = rc.scaled_residual(&state);
        let norm = scaled_residual.amax();
        let status = if !norm.is_finite() {
            SolveStatus::NonFinite
        } else if norm <= config.tolerance {
            SolveStatus::Converged
        } else {
            SolveStatus::MaxIterations
        };
        Ok(RootReport {
            state,
            scaled_residual,
            iterations: None,
            status,
            residual_history: vec![rc.scaled_residual(&guess).amax(), norm],
        })
    }

    fn name(&self) -> &str {
        "symbolic Newton (RustedSciThe)"
    }
}
