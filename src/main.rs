use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{arg, command, ArgMatches};
use serde::Serialize;
use tracing::{error, info};

use snh48live::{
    list_configs, load_config, logging, Context, Error, PlaylistMap, ProgressBar, ProjectPaths,
    Result, StageRegistry, VodMetadata,
};

/// Everything an upload of one performance needs.
#[derive(Debug, Serialize)]
struct UploadPlan {
    file: PathBuf,
    stage: Option<String>,
    team: String,
    playlist_ids: Vec<String>,
    metadata: VodMetadata,
}

fn get_config_files(ctx: &Context, matches: &ArgMatches) -> Result<Vec<PathBuf>> {
    if let Some(files) = matches.get_many::<String>("configs") {
        return Ok(files.map(PathBuf::from).collect());
    }
    let configs = list_configs(
        &ctx.paths.video_configs_dir,
        matches.get_flag("past"),
        matches.get_one::<String>("glob").map(String::as_str),
    )?;
    Ok(configs.into_iter().map(|(path, _)| path).collect())
}

fn load_all(ctx: &Context, files: &[PathBuf]) -> Result<Vec<(PathBuf, VodMetadata)>> {
    let options = ctx.load_options();
    let mut bar = ProgressBar::new(files.len() as u64);
    bar.activate().map_err(Error::Output)?;

    let mut loaded = Vec::with_capacity(files.len());
    for (idx, file) in files.iter().enumerate() {
        let metadata = load_config(file, &options)?;
        loaded.push((file.clone(), metadata));
        bar.update(idx as u64 + 1, false).map_err(Error::Output)?;
    }

    bar.done().map_err(Error::Output)?;
    Ok(loaded)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let root = matches.get_one::<String>("root").map(Path::new);
    let ctx = Context::load(ProjectPaths::discover(root)?)?;
    let stages = StageRegistry::load(&ctx.paths.stages_file())?;
    let playlists = PlaylistMap::load(&ctx.paths.playlists_file())?;

    let files = get_config_files(&ctx, matches)?;
    if files.is_empty() {
        info!("no configs in {}", ctx.paths.video_configs_dir.display());
        return Ok(());
    }

    let mut plans = Vec::with_capacity(files.len());
    for (file, metadata) in load_all(&ctx, &files)? {
        let stage = stages.title_to_stage(&metadata.title).map(String::from);
        let team = stages.stage_to_team(stage.as_deref())?.to_string();
        let playlist_ids = playlists
            .resolve(&metadata.playlists)
            .into_iter()
            .map(String::from)
            .collect();
        plans.push(UploadPlan {
            file,
            stage,
            team,
            playlist_ids,
            metadata,
        });
    }

    serde_yaml::to_writer(io::stdout(), &plans).map_err(Error::Serialize)
}

fn main() -> ExitCode {
    let matches = &command!()
        .about("Resolves performance configs into upload metadata")
        .arg(arg!(-r --root <root> "Project root directory"))
        .arg(arg!(-p --past "Include configs of past performances"))
        .arg(arg!(-g --glob <pattern> "Glob pattern under config/videos"))
        .arg(arg!(-t --timestamps "Prefix log lines with timestamps"))
        .arg(arg!([configs] ... "Config files to load instead of the pending ones"))
        .get_matches();

    logging::init_tracing(matches.get_flag("timestamps"));

    match run(matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
