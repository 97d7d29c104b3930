/// JSON task files for the sweep binary.
///
/// A task names the parameter set, the grids and the solver settings. Every field may be
/// omitted, missing ones take the reference values. Grids are either an explicit list or a
/// `{"start", "end", "points"}` range:
/// ```json
/// {
///   "parameters": { "version": "SiO2", "D_OO": 4.98e5, "D_NN": 9.413e5 },
///   "temperatures": { "start": 300.0, "end": 3000.0, "points": 28 },
///   "pressures": [10.0, 1100.0, 10000.0],
///   "solver": { "tolerance": 1e-10, "max_iterations": 50 },
///   "parallel": true,
///   "output": "gamma.csv"
/// }
/// ```
use crate::SteadyState::solver::SolverConfig;
use crate::SteadyState::sweep::{SweepConfig, SweepOrder};
use crate::SurfaceKinetics::parameters::ParameterConfig;
use crate::Utils::gas_mixture::linspace;
use crate::errors::SurfaceError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sweep axis: explicit values or an evenly spaced range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grid {
    List(Vec<f64>),
    Range { start: f64, end: f64, points: usize },
}

impl Grid {
    pub fn values(&self) -> Vec<f64> {
        match self {
            Grid::List(values) => values.clone(),
            Grid::Range { start, end, points } => linspace(*start, *end, *points),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::List(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepTask {
    pub parameters: ParameterConfig,
    pub temperatures: Grid,
    pub pressures: Grid,
    pub mole_fractions: Vec<f64>,
    pub order: SweepOrder,
    pub solver: SolverConfig,
    pub parallel: bool,
    /// CSV file for the result table
    pub output: Option<String>,
}

impl Default for SweepTask {
    fn default() -> Self {
        Self::reference()
    }
}

impl SweepTask {
    /// Reference parameters, 300..3000 K in 10 points, 10 / 100 / 1000 Pa.
    pub fn reference() -> Self {
        Self {
            parameters: ParameterConfig::reference(),
            temperatures: Grid::Range {
                start: 300.0,
                end: 3000.0,
                points: 10,
            },
            pressures: Grid::List(vec![10.0, 100.0, 1000.0]),
            mole_fractions: Vec::new(),
            order: SweepOrder::TemperatureOuter,
            solver: SolverConfig::default(),
            parallel: false,
            output: None,
        }
    }

    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            temperatures: self.temperatures.values(),
            pressures: self.pressures.values(),
            mole_fractions: self.mole_fractions.clone(),
            order: self.order,
            solver: self.solver.clone(),
            parallel: self.parallel,
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SurfaceError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

pub fn load_task<P: AsRef<Path>>(path: P) -> Result<SweepTask, SurfaceError> {
    let content = fs::read_to_string(path.as_ref())?;
    let task: SweepTask = serde_json::from_str(&content)?;
    info!(
        "task loaded from {}: parameters '{}'",
        path.as_ref().display(),
        task.parameters.version
    );
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SteadyState::solver::SolverMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reference_task() {
        let config = SweepTask::reference().sweep_config();
        assert_eq!(config.temperatures.len(), 10);
        assert_eq!(config.temperatures[0], 300.0);
        assert_eq!(config.temperatures[9], 3000.0);
        assert_eq!(config.pressures, vec![10.0, 100.0, 1000.0]);
        assert_eq!(config.operating_points().len(), 30);
    }

    #[test]
    fn test_partial_task_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "parameters": { "version": "SiO2", "D_OO": 4.98e5, "D_NN": 9.413e5 },
            "temperatures": [1000.0, 2000.0],
            "pressures": { "start": 100.0, "end": 1000.0, "points": 4 },
            "solver": { "method": "SymbolicNewton", "strict": true },
            "output": "out.csv"
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let task = load_task(file.path()).unwrap();
        assert_eq!(task.parameters.version, "SiO2");
        assert_eq!(task.parameters.D_NN, 9.413e5);
        assert_eq!(task.parameters.Qa_O, ParameterConfig::reference().Qa_O);
        assert_eq!(task.temperatures, Grid::List(vec![1000.0, 2000.0]));
        assert_eq!(task.pressures.values(), vec![100.0, 400.0, 700.0, 1000.0]);
        assert_eq!(task.solver.method, SolverMethod::SymbolicNewton);
        assert!(task.solver.strict);
        assert_eq!(task.solver.max_iterations, 100);
        assert!(!task.parallel);
        assert_eq!(task.output.as_deref(), Some("out.csv"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.json");
        let mut task = SweepTask::reference();
        task.mole_fractions = vec![0.5, 0.9];
        task.order = SweepOrder::PressureOuter;
        task.save(&path).unwrap();
        let loaded = load_task(&path).unwrap();
        assert_eq!(loaded.mole_fractions, vec![0.5, 0.9]);
        assert_eq!(loaded.order, SweepOrder::PressureOuter);
        assert_eq!(loaded.temperatures, task.temperatures);
        assert_eq!(loaded.pressures, task.pressures);
        assert_eq!(loaded.parameters.version, task.parameters.version);
        assert_eq!(loaded.parameters.D_OO, task.parameters.D_OO);
        assert_eq!(loaded.output, None);
    }

    #[test]
    fn test_bad_task_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ \"temperatures\": \"hot\" }").unwrap();
        assert!(matches!(load_task(file.path()), Err(SurfaceError::Json(_))));
        assert!(matches!(
            load_task("no/such/task.json"),
            Err(SurfaceError::Io(_))
        ));
    }
}
