// Prints the stage and team a performance title belongs to.
use std::path::Path;
use std::process::ExitCode;

use clap::{arg, command, ArgMatches};
use tracing::error;

use snh48live::{logging, ProjectPaths, Result, StageRegistry};

fn run(matches: &ArgMatches) -> Result<()> {
    let paths = ProjectPaths::discover(matches.get_one::<String>("root").map(Path::new))?;
    let registry = StageRegistry::load(&paths.stages_file())?;

    let title = matches
        .get_one::<String>("title")
        .map(String::as_str)
        .unwrap_or_default();
    let stage = registry.title_to_stage(title);
    let team = registry.stage_to_team(stage)?;

    println!("stage: {}", stage.unwrap_or("~"));
    println!("team: {}", team);
    Ok(())
}

fn main() -> ExitCode {
    let matches = &command!()
        .about("Classifies a performance title by stage and team")
        .arg(arg!(-r --root <root> "Project root directory"))
        .arg(arg!(<title> "Performance title"))
        .get_matches();

    logging::init_tracing(false);

    match run(matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
