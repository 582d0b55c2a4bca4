// Lists performance configs in upload order.
use std::path::Path;
use std::process::ExitCode;

use clap::{arg, command, ArgMatches};
use tracing::error;

use snh48live::{list_configs, logging, ProjectPaths, Result};

fn run(matches: &ArgMatches) -> Result<()> {
    let paths = ProjectPaths::discover(matches.get_one::<String>("root").map(Path::new))?;
    let configs = list_configs(
        &paths.video_configs_dir,
        matches.get_flag("past"),
        matches.get_one::<String>("glob").map(String::as_str),
    )?;

    for (path, desc) in configs {
        let rel = path.strip_prefix(&paths.video_configs_dir).unwrap_or(&path);
        println!(
            "{}\t{}\t{}\t{}\t{}",
            desc.date,
            desc.live_id,
            desc.stage,
            desc.perf_num.as_deref().unwrap_or("-"),
            rel.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = &command!()
        .about("Lists performance configs sorted by date and live id")
        .arg(arg!(-r --root <root> "Project root directory"))
        .arg(arg!(-p --past "Include configs in subdirectories"))
        .arg(arg!(-g --glob <pattern> "Glob pattern under config/videos"))
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
