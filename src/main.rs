use log::{debug, info};
use robogrid::config::{Config, RunReport};
use robogrid::{run_program, Grid};
use std::env;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // No program given: show usage, not an error
    if args.len() < 2 {
        println!("robogrid - runs robot programs on a walled grid");
        println!();
        println!("Usage: {} <program.txt> [config.toml]", args[0]);
        println!("Examples:");
        println!("  {} square.robot", args[0]);
        println!("  {} square.robot field.toml", args[0]);
        println!();
        println!("The config file may set step_limit and a [field] table with");
        println!("width, height, robot, walls and painted cells.");
        println!("ROBOGRID_STEP_LIMIT overrides step_limit (0 or none = unbounded).");
        return Ok(());
    }

    let program_path = &args[1];
    debug!("Loading program: {}", program_path);
    let source = match fs::read_to_string(program_path) {
        Ok(source) => source,
        Err(e) => {
            match e.kind() {
                std::io::ErrorKind::NotFound => {
                    eprintln!("Error: Program file not found: {}", program_path);
                    eprintln!();
                    eprintln!("Please check:");
                    eprintln!("• File path is correct");
                    eprintln!("• You're running from the right directory");
                }
                std::io::ErrorKind::InvalidData => {
                    eprintln!("Error: Program file is not valid UTF-8: {}", program_path);
                }
                _ => {
                    eprintln!("Error: Cannot open program file '{}': {}", program_path, e);
                }
            }
            std::process::exit(1);
        }
    };

    let config = match args.get(2) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .apply_env()?;

    let mut grid = Grid::from_state(config.field.clone())?;
    let step_limit = config.effective_step_limit();
    info!(
        "Field {}x{}, step limit {:?}",
        grid.width(),
        grid.height(),
        step_limit
    );

    let (error, trace) = match run_program(&source, &mut grid, step_limit) {
        Ok(trace) => (None, trace),
        Err(failure) => (Some(failure.error), failure.trace),
    };

    let report = RunReport {
        error: error.as_ref().map(|e| e.to_string()),
        trace,
        field: grid.dump_state(),
    };
    print!("{}", report.to_toml()?);

    if let Some(e) = error {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
