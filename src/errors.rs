//! Error type shared by the rate-law model, the steady-state solver and the task loader.
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(non_snake_case)]
pub enum SurfaceError {
    /// Temperature, pressure or mole fraction for which the rate law is undefined
    #[error("Invalid operating point (T = {T} K, p = {p} Pa): {reason}")]
    InvalidOperatingPoint { T: f64, p: f64, reason: String },
    /// Root finder did not reach the tolerance (strict mode only)
    #[error(
        "No convergence at T = {T} K, p = {p} Pa after {iterations} iterations, scaled residual {residual:e}"
    )]
    NonConvergence {
        T: f64,
        p: f64,
        residual: f64,
        iterations: usize,
    },
    /// Coverage outside [0, 1] or negative recombination coefficient (strict mode only)
    #[error("Unphysical solution at T = {T} K, p = {p} Pa: theta_O = {theta_O}, theta_N = {theta_N}")]
    UnphysicalSolution {
        T: f64,
        p: f64,
        theta_O: f64,
        theta_N: f64,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Solver error: {0}")]
    SolverError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_display() {
        let errors = vec![
            SurfaceError::InvalidOperatingPoint {
                T: 0.0,
                p: 10.0,
                reason: "temperature must be positive".to_string(),
            },
            SurfaceError::NonConvergence {
                T: 300.0,
                p: 10.0,
                residual: 1e-3,
                iterations: 100,
            },
            SurfaceError::UnphysicalSolution {
                T: 300.0,
                p: 10.0,
                theta_O: 1.2,
                theta_N: -0.1,
            },
            SurfaceError::InvalidParameter("nsite".to_string()),
            SurfaceError::SolverError("no result".to_string()),
        ];
        for error in errors {
            let error_string = format!("{}", error);
            assert!(!error_string.is_empty());
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SurfaceError = io.into();
        assert!(matches!(err, SurfaceError::Io(_)));
    }
}
