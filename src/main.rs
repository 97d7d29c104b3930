use SurfKin::SteadyState::sweep::run_sweep_with;
use SurfKin::Utils::task_loader::{SweepTask, load_task};
use SurfKin::errors::SurfaceError;
use log::{error, info, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::process::ExitCode;

fn run() -> Result<(), SurfaceError> {
    let task = match std::env::args().nth(1) {
        Some(path) => load_task(&path)?,
        None => {
            info!("no task file given, running the reference sweep");
            SweepTask::reference()
        }
    };
    let params = task.parameters.build()?;
    let report = run_sweep_with(&params, &task.sweep_config())?;
    report.table.pretty_print();

    for failure in &report.failures {
        warn!(
            "point {} (T = {} K, p = {} Pa) failed: {}",
            failure.index, failure.point.T, failure.point.p, failure.error
        );
    }
    if let Some(path) = &task.output {
        report.table.write_csv(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger not installed: {}", e);
    }
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
