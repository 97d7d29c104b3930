//! # Result rows and tables
//!
//! A [`ResultRow`] holds everything computed at one operating point: the converged
//! coverages, the four recombination coefficients, the eleven fluxes at the converged state
//! and the residual of the balance. Rows accumulate in a [`ResultTable`] in sweep order.
//!
//! ## Output
//! - `to_csv()` / `write_csv()`: one line per row, columns as listed in [`COLUMNS`]
//!   followed by diagnostics;
//! - `pretty_print()`: condensed terminal table via prettytable;
//! - `to_json()`: serde serialization of all rows.
use crate::SteadyState::solver::{RootReport, SolveStatus};
use crate::SurfaceKinetics::rate_law::{CoverageState, Fluxes, Gammas, RateCoefficients};
use crate::errors::SurfaceError;
use log::info;
use nalgebra::Vector2;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Numerical columns of the table, in export order.
pub const COLUMNS: [&str; 22] = [
    "theta_O",
    "theta_N",
    "T",
    "P",
    "x",
    "gamma_OO",
    "gamma_NN",
    "gamma_ON",
    "gamma_NO",
    "omega_ad_O",
    "omega_ad_N",
    "omega_ER_OO",
    "omega_ER_NN",
    "omega_ER_ON",
    "omega_ER_NO",
    "omega_LH_OO",
    "omega_LH_NN",
    "omega_LH_NO",
    "omega_des_O",
    "omega_des_N",
    "residual_O",
    "residual_N",
];

/// Diagnostic columns appended after [`COLUMNS`] in CSV output.
pub const DIAGNOSTIC_COLUMNS: [&str; 7] = [
    "C_O",
    "theta_OH",
    "scaled_residual_O",
    "scaled_residual_N",
    "iterations",
    "status",
    "quality",
];

/// Trust level of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Ok,
    /// the root finder stopped above tolerance
    NotConverged,
    /// theta outside [0, 1] or a negative gamma
    Unphysical,
    /// converged and physical, but a gamma is undefined (no impingement of its species)
    Undefined,
}

impl Quality {
    pub fn name(&self) -> &str {
        match self {
            Quality::Ok => "ok",
            Quality::NotConverged => "not_converged",
            Quality::Unphysical => "unphysical",
            Quality::Undefined => "undefined_gamma",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub T: f64,
    pub P: f64,
    /// 1000 / T
    pub x: f64,
    /// O mole fraction used at this point
    pub C_O: f64,
    pub theta_O: f64,
    pub theta_N: f64,
    pub theta_OH: f64,
    pub gamma_OO: f64,
    pub gamma_NN: f64,
    pub gamma_ON: f64,
    pub gamma_NO: f64,
    pub omega: Fluxes,
    /// (eq1, eq2) at the final state, molecules/(m^2 s)
    pub residuals: [f64; 2],
    /// residuals divided by the balance scale of the point
    pub scaled_residuals: [f64; 2],
    pub iterations: Option<usize>,
    pub status: SolveStatus,
    pub quality: Quality,
    pub residual_history: Vec<f64>,
}

impl ResultRow {
    pub fn new(
        rc: &RateCoefficients,
        state: CoverageState,
        omega: Fluxes,
        gammas: Gammas,
        residual: Vector2<f64>,
        report: &RootReport,
        quality: Quality,
    ) -> Self {
        Self {
            T: rc.T,
            P: rc.p,
            x: 1000.0 / rc.T,
            C_O: rc.C_O,
            theta_O: state.theta_O,
            theta_N: state.theta_N,
            theta_OH: rc.theta_OH,
            gamma_OO: gammas.gamma_OO,
            gamma_NN: gammas.gamma_NN,
            gamma_ON: gammas.gamma_ON,
            gamma_NO: gammas.gamma_NO,
            omega,
            residuals: [residual[0], residual[1]],
            scaled_residuals: [report.scaled_residual[0], report.scaled_residual[1]],
            iterations: report.iterations,
            status: report.status,
            quality,
            residual_history: report.residual_history.clone(),
        }
    }

    pub fn coverage(&self) -> CoverageState {
        CoverageState::new(self.theta_O, self.theta_N)
    }

    pub fn gammas(&self) -> Gammas {
        Gammas {
            gamma_OO: self.gamma_OO,
            gamma_NN: self.gamma_NN,
            gamma_ON: self.gamma_ON,
            gamma_NO: self.gamma_NO,
        }
    }

    pub fn scaled_residual_norm(&self) -> f64 {
        self.scaled_residuals[0].abs().max(self.scaled_residuals[1].abs())
    }

    /// Value of a numerical column by its export name.
    pub fn get(&self, column: &str) -> Option<f64> {
        let o = &self.omega;
        let value = match column {
            "theta_O" => self.theta_O,
            "theta_N" => self.theta_N,
            "T" => self.T,
            "P" => self.P,
            "x" => self.x,
            "gamma_OO" => self.gamma_OO,
            "gamma_NN" => self.gamma_NN,
            "gamma_ON" => self.gamma_ON,
            "gamma_NO" => self.gamma_NO,
            "omega_ad_O" => o.omega_ad_O,
            "omega_ad_N" => o.omega_ad_N,
            "omega_ER_OO" => o.omega_ER_OO,
            "omega_ER_NN" => o.omega_ER_NN,
            "omega_ER_ON" => o.omega_ER_ON,
            "omega_ER_NO" => o.omega_ER_NO,
            "omega_LH_OO" => o.omega_LH_OO,
            "omega_LH_NN" => o.omega_LH_NN,
            "omega_LH_NO" => o.omega_LH_NO,
            "omega_des_O" => o.omega_des_O,
            "omega_des_N" => o.omega_des_N,
            "residual_O" => self.residuals[0],
            "residual_N" => self.residuals[1],
            "C_O" => self.C_O,
            "theta_OH" => self.theta_OH,
            "scaled_residual_O" => self.scaled_residuals[0],
            "scaled_residual_N" => self.scaled_residuals[1],
            _ => return None,
        };
        Some(value)
    }

    fn csv_line(&self, delimiter: char) -> String {
        let mut fields: Vec<String> = COLUMNS
            .iter()
            .map(|c| format!("{:e}", self.get(c).unwrap_or(f64::NAN)))
            .collect();
        fields.push(format!("{:e}", self.C_O));
        fields.push(format!("{:e}", self.theta_OH));
        fields.push(format!("{:e}", self.scaled_residuals[0]));
        fields.push(format!("{:e}", self.scaled_residuals[1]));
        fields.push(
            self.iterations
                .map(|it| it.to_string())
                .unwrap_or_default(),
        );
        fields.push(self.status.name().to_string());
        fields.push(self.quality.name().to_string());
        fields.join(&delimiter.to_string())
    }
}

/// Ordered, append-only collection of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// Whole column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.rows.iter().map(|row| row.get(name)).collect()
    }

    /// Row at the given temperature and pressure (exact match on the sweep values).
    #[allow(non_snake_case)]
    pub fn find(&self, T: f64, P: f64) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.T == T && row.P == P)
    }

    /// Rows recorded at pressure `P`, in their original order.
    #[allow(non_snake_case)]
    pub fn at_pressure(&self, P: f64) -> ResultTable {
        ResultTable {
            rows: self.rows.iter().filter(|r| r.P == P).cloned().collect(),
        }
    }

    /// Distinct pressures in order of first appearance.
    pub fn pressures(&self) -> Vec<f64> {
        let mut out: Vec<f64> = Vec::new();
        for row in &self.rows {
            if !out.contains(&row.P) {
                out.push(row.P);
            }
        }
        out
    }

    /// Rows whose quality is not `Ok`.
    pub fn degraded(&self) -> Vec<&ResultRow> {
        self.rows
            .iter()
            .filter(|row| row.quality != Quality::Ok)
            .collect()
    }

    pub fn to_csv(&self, delimiter: char) -> String {
        let header: Vec<&str> = COLUMNS
            .iter()
            .chain(DIAGNOSTIC_COLUMNS.iter())
            .copied()
            .collect();
        let mut out = header.join(&delimiter.to_string());
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.csv_line(delimiter));
            out.push('\n');
        }
        out
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), SurfaceError> {
        let mut file = File::create(path.as_ref())?;
        file.write_all(self.to_csv(',').as_bytes())?;
        info!(
            "{} rows written to {}",
            self.rows.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SurfaceError> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    /// Prints coverages, gammas and residuals as a terminal table.
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row![
            "T, K", "P, Pa", "theta_O", "theta_N", "gamma_OO", "gamma_NN", "gamma_ON",
            "gamma_NO", "residual", "quality"
        ]);
        for r in &self.rows {
            table.add_row(row![
                format!("{:.1}", r.T),
                format!("{}", r.P),
                format!("{:.6}", r.theta_O),
                format!("{:.6}", r.theta_N),
                format!("{:.4e}", r.gamma_OO),
                format!("{:.4e}", r.gamma_NN),
                format!("{:.4e}", r.gamma_ON),
                format!("{:.4e}", r.gamma_NO),
                format!("{:.2e}", r.scaled_residual_norm()),
                r.quality.name()
            ]);
        }
        table.printstd();
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<ResultRow> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
