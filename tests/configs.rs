use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use snh48live::vod::scan_configs;
use snh48live::{list_configs, load_config, Context, ProjectPaths, StageRegistry};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> (TempDir, ProjectPaths) {
    let root = TempDir::new().unwrap();
    let paths = ProjectPaths::new(root.path());
    fs::create_dir_all(&paths.video_configs_dir).unwrap();
    (root, paths)
}

fn file_names(configs: &[(std::path::PathBuf, snh48live::ConfigFileDescriptor)]) -> Vec<String> {
    configs
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn malformed_filenames_are_skipped() {
    let (_root, paths) = project();
    let dir = &paths.video_configs_dir;
    touch(dir, "20180101-5-foo.yml", "title: foo\n");
    touch(dir, "draft.yml", "title: draft\n");

    let scan = scan_configs(dir, false, None).unwrap();
    assert_eq!(scan.configs.len(), 1);
    assert_eq!(scan.malformed.len(), 1);
    assert!(scan.malformed[0].ends_with("draft.yml"));

    let configs = list_configs(dir, false, None).unwrap();
    assert_eq!(file_names(&configs), vec!["20180101-5-foo.yml"]);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn malformed_filename_logs_one_warning() {
    let (_root, paths) = project();
    let dir = &paths.video_configs_dir;
    touch(dir, "20180101-5-foo.yml", "title: foo\n");
    touch(dir, "draft.yml", "title: draft\n");

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let configs = tracing::subscriber::with_default(subscriber, || {
        list_configs(dir, false, None).unwrap()
    });
    assert_eq!(configs.len(), 1);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let warnings: Vec<&str> = output.lines().filter(|line| line.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1, "{}", output);
    assert!(warnings[0].contains("malformed filename 'draft.yml'"));
}

#[test]
fn sorted_by_date_then_numeric_live_id() {
    let (_root, paths) = project();
    let dir = &paths.video_configs_dir;
    touch(dir, "20180102-1-late.yml", "");
    touch(dir, "20180101-10-bar.yml", "");
    touch(dir, "20180101-5-foo.yml", "");
    touch(dir, "20180101-gnz7-baz.yml", "");

    let configs = list_configs(dir, false, None).unwrap();
    assert_eq!(
        file_names(&configs),
        vec![
            "20180101-5-foo.yml",
            "20180101-gnz7-baz.yml",
            "20180101-10-bar.yml",
            "20180102-1-late.yml",
        ]
    );
}

#[test]
fn past_configs_live_in_subdirectories() {
    let (_root, paths) = project();
    let dir = &paths.video_configs_dir;
    touch(dir, "20180301-3-now.yml", "");
    touch(dir, "2017/20171201-2-old.yml", "");

    let pending = list_configs(dir, false, None).unwrap();
    assert_eq!(file_names(&pending), vec!["20180301-3-now.yml"]);

    let all = list_configs(dir, true, None).unwrap();
    assert_eq!(
        file_names(&all),
        vec!["20171201-2-old.yml", "20180301-3-now.yml"]
    );
    assert_eq!(all[0].1.stage, "old");
}

#[test]
fn glob_override_limits_results() {
    let (_root, paths) = project();
    let dir = &paths.video_configs_dir;
    touch(dir, "20180301-3-a.yml", "");
    touch(dir, "20180401-4-b.yml", "");

    let configs = list_configs(dir, false, Some("201804*.yml")).unwrap();
    assert_eq!(file_names(&configs), vec!["20180401-4-b.yml"]);
}

#[test]
fn directories_are_not_configs() {
    let (_root, paths) = project();
    let dir = &paths.video_configs_dir;
    fs::create_dir_all(dir.join("20180101-1-dir.yml")).unwrap();

    let scan = scan_configs(dir, false, None).unwrap();
    assert!(scan.configs.is_empty());
    assert!(scan.malformed.is_empty());
}

#[test]
fn loads_through_context() {
    let (root, paths) = project();
    touch(&paths.configs_dir, "main.yml", "vod_fallback: true\n");
    touch(
        &paths.data_dir,
        "stages.yml",
        "心的旅程:\n  team: SII\n第48区:\n  team: SII\n",
    );
    touch(
        &paths.video_configs_dir,
        "20180101-421-心的旅程-01.yml",
        "title: Team SII《心的旅程》公演\ntags: [Team SII]\nthumbnail: 20180101.png\n",
    );

    let ctx = Context::load(ProjectPaths::new(root.path())).unwrap();
    let stages = StageRegistry::load(&ctx.paths.stages_file()).unwrap();
    let configs = list_configs(&ctx.paths.video_configs_dir, false, None).unwrap();
    let (path, desc) = &configs[0];
    let meta = load_config(path, &ctx.load_options()).unwrap();

    assert_eq!(desc.stage, "心的旅程");
    assert_eq!(meta.tags, vec!["SNH48", "Team SII"]);
    assert_eq!(meta.vod.as_deref(), Some(snh48live::vod::PLATFORM_HOME_URL));
    assert_eq!(
        meta.thumbnail.as_deref(),
        Some(paths.generated_thumbnails_dir.join("20180101.png").as_path())
    );

    let stage = stages.title_to_stage(&meta.title);
    assert_eq!(stage, Some("心的旅程"));
    assert_eq!(stages.stage_to_team(stage).unwrap(), "SII");
}
