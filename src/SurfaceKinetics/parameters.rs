//! # Parameter sets for the O/N surface recombination model
//!
//! Two forms of the same data live here:
//! - **`ParameterConfig`**: what a user writes in a task file. Energies are given in J/mol,
//!   atomic masses in g/mol. Every field has a serde default taken from the reference
//!   parameter set, so a JSON file only has to list the values it changes.
//! - **`ParameterSet`**: what the rate law consumes. Energies are stored per molecule
//!   (J/mol divided by Avogadro's number) so that every Boltzmann factor reads
//!   `exp(-Q / (kB * T))`, and the three effective Langmuir-Hinshelwood activation energies
//!   are derived once.
//!
//! ## Presets
//! | preset | D_OO, J/mol | D_NN, J/mol | use |
//! |--------|-------------|-------------|-----|
//! | `reference()` | 2.550e5 | 3.113e5 | default test parameter file |
//! | `sio2()` | 4.980e5 | 9.413e5 | silica wall variant |
use crate::errors::SurfaceError;
use log::warn;
use serde::{Deserialize, Serialize};

/// Boltzmann constant, J/K
pub const K_B: f64 = 1.380649e-23;
/// Avogadro constant as used by the reference parameter files, 1/mol
pub const N_A: f64 = 6.02e23;
/// Planck constant, J*s
pub const H_PLANCK: f64 = 6.62607015e-34;

/// Physical constants and tunable coefficients of the model in molar input units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterConfig {
    /// identifier of the parameter set, copied into the `ParameterSet`
    pub version: String,
    pub kB: f64,
    pub Na: f64,
    pub h: f64,
    /// relative atomic masses, g/mol
    pub M_O: f64,
    pub M_N: f64,
    /// mole fractions of atomic O and N in the gas
    pub C_O: f64,
    pub C_N: f64,
    /// sticking coefficients
    pub s_O: f64,
    pub s_N: f64,
    /// thermal desorption shape factor
    pub cA: f64,
    /// site density, 1/m^2
    pub nsite: f64,
    /// mean distance between sites, m
    pub delta: f64,
    /// hydroxyl blocking: saturation fraction and energy, J/mol
    pub AA: f64,
    pub E_OH: f64,
    /// Eley-Rideal steric factors
    pub P_erOO: f64,
    pub P_erNN: f64,
    pub P_erON: f64,
    pub P_erNO: f64,
    /// Eley-Rideal activation energies, J/mol
    pub Q_erOO: f64,
    pub Q_erNN: f64,
    pub Q_erON: f64,
    pub Q_erNO: f64,
    /// adsorption heats, J/mol
    pub Qa_O: f64,
    pub Qa_N: f64,
    /// dissociation energies, J/mol
    pub D_OO: f64,
    pub D_NN: f64,
    pub D_NO: f64,
    /// surface migration energies, J/mol
    pub Em_O: f64,
    pub Em_N: f64,
}

impl Default for ParameterConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl ParameterConfig {
    /// Parameter set of the default test parameter file: O/N mixture 10:1 at the wall.
    pub fn reference() -> Self {
        Self {
            version: "reference".to_string(),
            kB: K_B,
            Na: N_A,
            h: H_PLANCK,
            M_O: 16.0,
            M_N: 14.0,
            C_O: 10.0 / 11.0,
            C_N: 1.0 / 11.0,
            s_O: 0.05,
            s_N: 0.015,
            cA: 3.5,
            nsite: 5e18,
            delta: 5.0e-10,
            AA: 0.8,
            E_OH: 2.5e3,
            P_erOO: 0.1,
            P_erNN: 0.1,
            P_erON: 0.1,
            P_erNO: 0.1,
            Q_erOO: 2.0e4,
            Q_erNN: 2.0e4,
            Q_erON: 2.0e4,
            Q_erNO: 2.0e4,
            Qa_O: 4.998e5,
            Qa_N: 5.308e5,
            D_OO: 2.550e5,
            D_NN: 3.113e5,
            D_NO: 6.251e5,
            Em_O: 1.591e5,
            Em_N: 2.362e5,
        }
    }

    /// Silica wall variant: molecular dissociation energies of O2 and N2.
    pub fn sio2() -> Self {
        Self {
            version: "sio2".to_string(),
            D_OO: 4.980e5,
            D_NN: 9.413e5,
            ..Self::reference()
        }
    }

    fn check(&self) -> Result<(), SurfaceError> {
        let all = [
            ("kB", self.kB),
            ("Na", self.Na),
            ("h", self.h),
            ("M_O", self.M_O),
            ("M_N", self.M_N),
            ("C_O", self.C_O),
            ("C_N", self.C_N),
            ("s_O", self.s_O),
            ("s_N", self.s_N),
            ("cA", self.cA),
            ("nsite", self.nsite),
            ("delta", self.delta),
            ("AA", self.AA),
            ("E_OH", self.E_OH),
            ("P_erOO", self.P_erOO),
            ("P_erNN", self.P_erNN),
            ("P_erON", self.P_erON),
            ("P_erNO", self.P_erNO),
            ("Q_erOO", self.Q_erOO),
            ("Q_erNN", self.Q_erNN),
            ("Q_erON", self.Q_erON),
            ("Q_erNO", self.Q_erNO),
            ("Qa_O", self.Qa_O),
            ("Qa_N", self.Qa_N),
            ("D_OO", self.D_OO),
            ("D_NN", self.D_NN),
            ("D_NO", self.D_NO),
            ("Em_O", self.Em_O),
            ("Em_N", self.Em_N),
        ];
        for (name, value) in all {
            if !value.is_finite() {
                return Err(SurfaceError::InvalidParameter(format!(
                    "{} is not finite: {}",
                    name, value
                )));
            }
        }
        let positive = [
            ("kB", self.kB),
            ("Na", self.Na),
            ("h", self.h),
            ("M_O", self.M_O),
            ("M_N", self.M_N),
            ("nsite", self.nsite),
            ("delta", self.delta),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(SurfaceError::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        // out-of-range probabilities are logged, not rejected
        let probabilities = [
            ("s_O", self.s_O),
            ("s_N", self.s_N),
            ("P_erOO", self.P_erOO),
            ("P_erNN", self.P_erNN),
            ("P_erON", self.P_erON),
            ("P_erNO", self.P_erNO),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                warn!("{} = {} lies outside [0, 1]", name, value);
            }
        }
        Ok(())
    }

    /// Validates the configuration and converts it to per-molecule units.
    pub fn build(&self) -> Result<ParameterSet, SurfaceError> {
        self.check()?;
        let Na = self.Na;
        let Qa_O = self.Qa_O / Na;
        let Qa_N = self.Qa_N / Na;
        let D_OO = self.D_OO / Na;
        let D_NN = self.D_NN / Na;
        let D_NO = self.D_NO / Na;
        let Em_O = self.Em_O / Na;
        let Em_N = self.Em_N / Na;
        Ok(ParameterSet {
            version: self.version.clone(),
            kB: self.kB,
            Na,
            h: self.h,
            mass_O: self.M_O / 1000.0 / Na,
            mass_N: self.M_N / 1000.0 / Na,
            C_O: self.C_O,
            C_N: self.C_N,
            s_O: self.s_O,
            s_N: self.s_N,
            cA: self.cA,
            nsite: self.nsite,
            delta: self.delta,
            AA: self.AA,
            // kept in J/mol: the blocking exponent is E_OH / (Na * T)
            E_OH: self.E_OH,
            P_erOO: self.P_erOO,
            P_erNN: self.P_erNN,
            P_erON: self.P_erON,
            P_erNO: self.P_erNO,
            Q_erOO: self.Q_erOO / Na,
            Q_erNN: self.Q_erNN / Na,
            Q_erON: self.Q_erON / Na,
            Q_erNO: self.Q_erNO / Na,
            Qa_O,
            Qa_N,
            D_OO,
            D_NN,
            D_NO,
            Em_O,
            Em_N,
            Q_lhOO: Em_O.max(2.0 * Qa_O - D_OO),
            Q_lhNN: Em_N.max(2.0 * Qa_N - D_NN),
            Q_lhNO: Qa_O + Qa_N - D_NO,
        })
    }
}

/// Immutable parameter set consumed by the rate law.
///
/// Energies are in J/molecule, masses in kg/molecule. Built with [`ParameterConfig::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    version: String,
    kB: f64,
    Na: f64,
    h: f64,
    mass_O: f64,
    mass_N: f64,
    C_O: f64,
    C_N: f64,
    s_O: f64,
    s_N: f64,
    cA: f64,
    nsite: f64,
    delta: f64,
    AA: f64,
    E_OH: f64,
    P_erOO: f64,
    P_erNN: f64,
    P_erON: f64,
    P_erNO: f64,
    Q_erOO: f64,
    Q_erNN: f64,
    Q_erON: f64,
    Q_erNO: f64,
    Qa_O: f64,
    Qa_N: f64,
    D_OO: f64,
    D_NN: f64,
    D_NO: f64,
    Em_O: f64,
    Em_N: f64,
    Q_lhOO: f64,
    Q_lhNN: f64,
    Q_lhNO: f64,
}

impl ParameterSet {
    /// Reference parameter set, already validated.
    pub fn reference() -> Self {
        ParameterConfig::reference()
            .build()
            .expect("reference parameters are valid")
    }

    pub fn sio2() -> Self {
        ParameterConfig::sio2()
            .build()
            .expect("sio2 parameters are valid")
    }

    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn kB(&self) -> f64 {
        self.kB
    }
    pub fn Na(&self) -> f64 {
        self.Na
    }
    pub fn h(&self) -> f64 {
        self.h
    }
    pub fn mass_O(&self) -> f64 {
        self.mass_O
    }
    pub fn mass_N(&self) -> f64 {
        self.mass_N
    }
    pub fn C_O(&self) -> f64 {
        self.C_O
    }
    pub fn C_N(&self) -> f64 {
        self.C_N
    }
    pub fn s_O(&self) -> f64 {
        self.s_O
    }
    pub fn s_N(&self) -> f64 {
        self.s_N
    }
    pub fn cA(&self) -> f64 {
        self.cA
    }
    pub fn nsite(&self) -> f64 {
        self.nsite
    }
    pub fn delta(&self) -> f64 {
        self.delta
    }
    pub fn AA(&self) -> f64 {
        self.AA
    }
    /// J/mol
    pub fn E_OH(&self) -> f64 {
        self.E_OH
    }
    pub fn P_erOO(&self) -> f64 {
        self.P_erOO
    }
    pub fn P_erNN(&self) -> f64 {
        self.P_erNN
    }
    pub fn P_erON(&self) -> f64 {
        self.P_erON
    }
    pub fn P_erNO(&self) -> f64 {
        self.P_erNO
    }
    pub fn Q_erOO(&self) -> f64 {
        self.Q_erOO
    }
    pub fn Q_erNN(&self) -> f64 {
        self.Q_erNN
    }
    pub fn Q_erON(&self) -> f64 {
        self.Q_erON
    }
    pub fn Q_erNO(&self) -> f64 {
        self.Q_erNO
    }
    pub fn Qa_O(&self) -> f64 {
        self.Qa_O
    }
    pub fn Qa_N(&self) -> f64 {
        self.Qa_N
    }
    pub fn D_OO(&self) -> f64 {
        self.D_OO
    }
    pub fn D_NN(&self) -> f64 {
        self.D_NN
    }
    pub fn D_NO(&self) -> f64 {
        self.D_NO
    }
    pub fn Em_O(&self) -> f64 {
        self.Em_O
    }
    pub fn Em_N(&self) -> f64 {
        self.Em_N
    }
    pub fn Q_lhOO(&self) -> f64 {
        self.Q_lhOO
    }
    pub fn Q_lhNN(&self) -> f64 {
        self.Q_lhNN
    }
    pub fn Q_lhNO(&self) -> f64 {
        self.Q_lhNO
    }
}
