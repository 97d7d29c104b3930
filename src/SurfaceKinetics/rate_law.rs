//! # Rate law of O/N atom recombination on a catalytic surface
//!
//! For one operating point (wall temperature T, total pressure p, composition) every
//! temperature- and pressure-dependent factor of the rate law is computed once and stored
//! in [`RateCoefficients`]. The fluxes are then plain polynomials in the two coverages
//! (θ_O, θ_N) and are evaluated as methods, so the root finder never rebuilds anything
//! inside its iteration loop.
//!
//! ## Per-point quantities
//! - impingement fluxes (Hertz-Knudsen): n_s = p_s / sqrt(2π m_s kB T)
//! - Eley-Rideal prefactors: γ*_c = P_c exp(-Q_c / kB T)
//! - thermal attempt frequencies: v_s = (cA / δ) sqrt(π kB T / 2 m_s)
//! - blocked-site fraction: θ_OH = AA (1 - exp(-E_OH / (Na T)))
//!
//! ## Balance equations
//! ```text
//! eq1 = ads_O - ER_OO - ER_NO - LH_NO - LH_OO - des_O
//! eq2 = ads_N - ER_NN - ER_ON - LH_NO - LH_NN - des_N
//! ```
//! Nothing here guards θ against leaving [0, 1]; the solver decides what to do with it.
use crate::SurfaceKinetics::parameters::ParameterSet;
use crate::errors::SurfaceError;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Slack allowed on the [0, 1] coverage bounds and on the sign of gamma: an absent species
/// converges to a rounding-level value of either sign.
pub const PHYSICAL_TOLERANCE: f64 = 1e-10;

/// Wall temperature [K], total pressure [Pa] and an optional O mole fraction override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub T: f64,
    pub p: f64,
    /// when set, C_O takes this value and C_N = 1 - C_O
    pub C_O: Option<f64>,
}

impl OperatingPoint {
    pub fn new(T: f64, p: f64) -> Self {
        Self { T, p, C_O: None }
    }

    pub fn with_mole_fraction(T: f64, p: f64, C_O: f64) -> Self {
        Self {
            T,
            p,
            C_O: Some(C_O),
        }
    }

    fn invalid(&self, reason: &str) -> SurfaceError {
        SurfaceError::InvalidOperatingPoint {
            T: self.T,
            p: self.p,
            reason: reason.to_string(),
        }
    }

    /// Rejects points where the rate law is singular or meaningless.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if !self.T.is_finite() || self.T <= 0.0 {
            return Err(self.invalid("temperature must be positive and finite"));
        }
        if !self.p.is_finite() || self.p < 0.0 {
            return Err(self.invalid("pressure must be non-negative and finite"));
        }
        if let Some(C_O) = self.C_O
            && !(C_O.is_finite() && (0.0..=1.0).contains(&C_O))
        {
            return Err(self.invalid("mole fraction override must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Fractional occupancy of surface sites by adsorbed O and N.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageState {
    pub theta_O: f64,
    pub theta_N: f64,
}

impl CoverageState {
    pub fn new(theta_O: f64, theta_N: f64) -> Self {
        Self { theta_O, theta_N }
    }

    /// Neutral mid-coverage start of every root-find.
    pub fn initial_guess() -> Self {
        Self::new(0.5, 0.5)
    }

    pub fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.theta_O, self.theta_N)
    }

    pub fn from_vector(v: &Vector2<f64>) -> Self {
        Self::new(v[0], v[1])
    }

    /// Both coverages within [0, 1] up to [`PHYSICAL_TOLERANCE`].
    pub fn is_physical(&self) -> bool {
        let bounds = -PHYSICAL_TOLERANCE..=1.0 + PHYSICAL_TOLERANCE;
        bounds.contains(&self.theta_O) && bounds.contains(&self.theta_N)
    }
}

/// All eleven surface fluxes at one coverage state, molecules/(m^2 s).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Fluxes {
    pub omega_ad_O: f64,
    pub omega_ad_N: f64,
    pub omega_ER_OO: f64,
    pub omega_ER_NN: f64,
    pub omega_ER_ON: f64,
    pub omega_ER_NO: f64,
    pub omega_LH_OO: f64,
    pub omega_LH_NN: f64,
    pub omega_LH_NO: f64,
    pub omega_des_O: f64,
    pub omega_des_N: f64,
}

/// Recombination coefficients derived from the fluxes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gammas {
    pub gamma_OO: f64,
    pub gamma_NN: f64,
    pub gamma_ON: f64,
    pub gamma_NO: f64,
}

impl Gammas {
    fn values(&self) -> [f64; 4] {
        [self.gamma_OO, self.gamma_NN, self.gamma_ON, self.gamma_NO]
    }

    pub fn any_negative(&self) -> bool {
        self.values().iter().any(|g| *g < -PHYSICAL_TOLERANCE)
    }

    /// Some coefficient is NaN or infinite, e.g. its species does not reach the wall.
    pub fn any_undefined(&self) -> bool {
        self.values().iter().any(|g| !g.is_finite())
    }
}

/// Temperature- and pressure-dependent factors of the rate law for one operating point.
///
/// Each flux is `coefficient * monomial(θ_O, θ_N)`; the coefficients are the fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateCoefficients {
    pub T: f64,
    pub p: f64,
    /// effective mole fractions at this point
    pub C_O: f64,
    pub C_N: f64,
    /// impingement fluxes, 1/(m^2 s)
    pub n_O: f64,
    pub n_N: f64,
    pub gamma_star_OO: f64,
    pub gamma_star_NN: f64,
    pub gamma_star_ON: f64,
    pub gamma_star_NO: f64,
    /// thermal attempt frequencies, 1/s
    pub v_O: f64,
    pub v_N: f64,
    pub theta_OH: f64,
    pub s_O: f64,
    pub s_N: f64,
    /// 2 v_O nsite exp(-Q_lhOO / kT)
    pub k_LH_OO: f64,
    /// 2 v_N nsite exp(-Q_lhNN / kT)
    pub k_LH_NN: f64,
    /// (v_O + v_N) nsite exp(-Q_lhNO / kT)
    pub k_LH_NO: f64,
    /// nsite (kT / h) exp(-Qa_s / kT)
    pub k_des_O: f64,
    pub k_des_N: f64,
}

impl RateCoefficients {
    pub fn new(params: &ParameterSet, point: &OperatingPoint) -> Result<Self, SurfaceError> {
        point.validate()?;
        let T = point.T;
        let p = point.p;
        let kT = params.kB() * T;
        let (C_O, C_N) = match point.C_O {
            Some(C_O) => (C_O, 1.0 - C_O),
            None => (params.C_O(), params.C_N()),
        };

        let p_O = p * C_O;
        let p_N = p * C_N;
        let n_O = p_O / (2.0 * PI * params.mass_O() * kT).sqrt();
        let n_N = p_N / (2.0 * PI * params.mass_N() * kT).sqrt();

        let boltzmann = |Q: f64| (-Q / kT).exp();
        let v_O = (params.cA() / params.delta()) * (PI * kT / (2.0 * params.mass_O())).sqrt();
        let v_N = (params.cA() / params.delta()) * (PI * kT / (2.0 * params.mass_N())).sqrt();
        let nsite = params.nsite();
        let attempt = kT / params.h();

        Ok(Self {
            T,
            p,
            C_O,
            C_N,
            n_O,
            n_N,
            gamma_star_OO: params.P_erOO() * boltzmann(params.Q_erOO()),
            gamma_star_NN: params.P_erNN() * boltzmann(params.Q_erNN()),
            gamma_star_ON: params.P_erON() * boltzmann(params.Q_erON()),
            gamma_star_NO: params.P_erNO() * boltzmann(params.Q_erNO()),
            v_O,
            v_N,
            theta_OH: theta_OH(params, T),
            s_O: params.s_O(),
            s_N: params.s_N(),
            k_LH_OO: 2.0 * v_O * nsite * boltzmann(params.Q_lhOO()),
            k_LH_NN: 2.0 * v_N * nsite * boltzmann(params.Q_lhNN()),
            k_LH_NO: (v_O + v_N) * nsite * boltzmann(params.Q_lhNO()),
            k_des_O: nsite * attempt * boltzmann(params.Qa_O()),
            k_des_N: nsite * attempt * boltzmann(params.Qa_N()),
        })
    }

    fn free_sites(&self, s: &CoverageState) -> f64 {
        1.0 - s.theta_O - s.theta_N - self.theta_OH
    }

    pub fn omega_ad_O(&self, s: &CoverageState) -> f64 {
        self.s_O * self.free_sites(s) * self.n_O
    }
    pub fn omega_ad_N(&self, s: &CoverageState) -> f64 {
        self.s_N * self.free_sites(s) * self.n_N
    }
    pub fn omega_ER_OO(&self, s: &CoverageState) -> f64 {
        self.gamma_star_OO * s.theta_O * self.n_O
    }
    pub fn omega_ER_NN(&self, s: &CoverageState) -> f64 {
        self.gamma_star_NN * s.theta_N * self.n_N
    }
    /// gas-phase O hitting adsorbed N
    pub fn omega_ER_ON(&self, s: &CoverageState) -> f64 {
        self.gamma_star_ON * s.theta_N * self.n_O
    }
    /// gas-phase N hitting adsorbed O
    pub fn omega_ER_NO(&self, s: &CoverageState) -> f64 {
        self.gamma_star_NO * s.theta_O * self.n_N
    }
    pub fn omega_LH_OO(&self, s: &CoverageState) -> f64 {
        self.k_LH_OO * s.theta_O * s.theta_O
    }
    pub fn omega_LH_NN(&self, s: &CoverageState) -> f64 {
        self.k_LH_NN * s.theta_N * s.theta_N
    }
    pub fn omega_LH_NO(&self, s: &CoverageState) -> f64 {
        self.k_LH_NO * s.theta_O * s.theta_N
    }
    pub fn omega_des_O(&self, s: &CoverageState) -> f64 {
        self.k_des_O * s.theta_O
    }
    pub fn omega_des_N(&self, s: &CoverageState) -> f64 {
        self.k_des_N * s.theta_N
    }

    pub fn fluxes(&self, s: &CoverageState) -> Fluxes {
        Fluxes {
            omega_ad_O: self.omega_ad_O(s),
            omega_ad_N: self.omega_ad_N(s),
            omega_ER_OO: self.omega_ER_OO(s),
            omega_ER_NN: self.omega_ER_NN(s),
            omega_ER_ON: self.omega_ER_ON(s),
            omega_ER_NO: self.omega_ER_NO(s),
            omega_LH_OO: self.omega_LH_OO(s),
            omega_LH_NN: self.omega_LH_NN(s),
            omega_LH_NO: self.omega_LH_NO(s),
            omega_des_O: self.omega_des_O(s),
            omega_des_N: self.omega_des_N(s),
        }
    }

    /// Steady-state balance (eq1, eq2) in flux units.
    pub fn residual(&self, s: &CoverageState) -> Vector2<f64> {
        let f = self.fluxes(s);
        Vector2::new(
            f.omega_ad_O
                - f.omega_ER_OO
                - f.omega_ER_NO
                - f.omega_LH_NO
                - f.omega_LH_OO
                - f.omega_des_O,
            f.omega_ad_N
                - f.omega_ER_NN
                - f.omega_ER_ON
                - f.omega_LH_NO
                - f.omega_LH_NN
                - f.omega_des_N,
        )
    }

    /// Analytic Jacobian of [`Self::residual`] with respect to (θ_O, θ_N).
    pub fn jacobian(&self, s: &CoverageState) -> Matrix2<f64> {
        let a_O = self.s_O * self.n_O;
        let a_N = self.s_N * self.n_N;
        let (tO, tN) = (s.theta_O, s.theta_N);
        Matrix2::new(
            -a_O - self.gamma_star_OO * self.n_O
                - self.gamma_star_NO * self.n_N
                - self.k_LH_NO * tN
                - 2.0 * self.k_LH_OO * tO
                - self.k_des_O,
            -a_O - self.k_LH_NO * tO,
            -a_N - self.k_LH_NO * tN,
            -a_N - self.gamma_star_NN * self.n_N
                - self.gamma_star_ON * self.n_O
                - self.k_LH_NO * tO
                - 2.0 * self.k_LH_NN * tN
                - self.k_des_N,
        )
    }

    /// Constant flux scale of each balance equation.
    ///
    /// Sum of the magnitudes of every rate coefficient entering the equation, 1.0 when all
    /// of them vanish. Dividing the residual by it gives a dimensionless balance that is
    /// O(1) away from the root whatever the pressure.
    pub fn balance_scale(&self) -> Vector2<f64> {
        let s1 = (self.s_O * self.n_O).abs()
            + (self.gamma_star_OO * self.n_O).abs()
            + (self.gamma_star_NO * self.n_N).abs()
            + self.k_LH_NO.abs()
            + self.k_LH_OO.abs()
            + self.k_des_O.abs();
        let s2 = (self.s_N * self.n_N).abs()
            + (self.gamma_star_NN * self.n_N).abs()
            + (self.gamma_star_ON * self.n_O).abs()
            + self.k_LH_NO.abs()
            + self.k_LH_NN.abs()
            + self.k_des_N.abs();
        let guard = |s: f64| if s > 0.0 && s.is_finite() { s } else { 1.0 };
        Vector2::new(guard(s1), guard(s2))
    }

    pub fn scaled_residual(&self, s: &CoverageState) -> Vector2<f64> {
        self.residual(s).component_div(&self.balance_scale())
    }

    pub fn scaled_jacobian(&self, s: &CoverageState) -> Matrix2<f64> {
        let scale = self.balance_scale();
        let mut J = self.jacobian(s);
        for j in 0..2 {
            J[(0, j)] /= scale[0];
            J[(1, j)] /= scale[1];
        }
        J
    }

    /// Recombination coefficients: recombination flux over impingement flux.
    ///
    /// A coefficient whose impingement flux is zero (p = 0 or a zero mole fraction) is
    /// NaN, whatever the residual coverage left by the root finder.
    pub fn gammas(&self, f: &Fluxes) -> Gammas {
        let per_impact = |flux: f64, n: f64| if n > 0.0 { flux / n } else { f64::NAN };
        let mixed = f.omega_LH_NO + f.omega_ER_NO + f.omega_ER_ON;
        Gammas {
            gamma_OO: per_impact(f.omega_LH_OO + 2.0 * f.omega_ER_OO, self.n_O),
            gamma_NN: per_impact(f.omega_LH_NN + 2.0 * f.omega_ER_NN, self.n_N),
            gamma_ON: per_impact(mixed, self.n_O),
            gamma_NO: per_impact(mixed, self.n_N),
        }
    }
}

/// Fraction of sites blocked by hydroxyl groups at temperature `T`.
pub fn theta_OH(params: &ParameterSet, T: f64) -> f64 {
    params.AA() * (1.0 - (-params.E_OH() / params.Na() / T).exp())
}
