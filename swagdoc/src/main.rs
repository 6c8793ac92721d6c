//! swagdoc: compile a Swagger 2.0 document from annotated classes.
//!
//! `swagdoc -m classes.toml -c swagdoc.toml -o swagger.json`
//!
//! Class manifests (`.toml` / `.json`, globs and directories accepted) are
//! merged into one provider, the configured controller is compiled, and the
//! document is written to `--output` or stdout. Nothing is written when
//! compilation fails.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use swagdoc::introspect::{self, ClassManifest};
use swagdoc::{render, Config};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Config file picked up from the working directory when `-c` is omitted.
const DEFAULT_CONFIG: &str = "swagdoc.toml";

/// File name, without extension, used when `-o` names a directory.
const DEFAULT_OUTPUT_STEM: &str = "swagger";

/// File extensions recognized as class manifests.
const SUPPORTED_EXTENSIONS: &[&str] = &["toml", "json"];

#[derive(Parser)]
#[command(
    name = "swagdoc",
    version,
    about = "Compile a Swagger 2.0 document from @tag annotated controller and model classes"
)]
struct Cli {
    /// Class manifests (files, directories or glob patterns)
    #[arg(short = 'm', long = "manifest", required = true)]
    manifests: Vec<String>,

    /// Compiler configuration file (default: ./swagdoc.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Controller class to compile (overrides `controller`)
    #[arg(long)]
    controller: Option<String>,

    /// Namespace for unqualified model names (overrides `models_namespace`)
    #[arg(long)]
    models_namespace: Option<String>,

    /// Default host when the controller has no @host
    #[arg(long)]
    host: Option<String>,

    /// Default basePath when the controller has no @basePath
    #[arg(long)]
    base_path: Option<String>,

    /// Output file, or a directory to receive swagger.<ext> (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), json-compact
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<swagdoc::Error>() {
                Some(compile_err) => eprintln!(
                    "error: {} (status {})",
                    compile_err,
                    compile_err.status_code()
                ),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info,swagdoc=debug",
        _ => "info,swagdoc=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let renderer = render::create_renderer(&cli.format)?;

    let mut provider = ClassManifest::default();
    for path in resolve_manifests(&cli.manifests)? {
        debug!(manifest = %path.display(), "loading class manifest");
        provider.merge(introspect::load_manifest(&path)?)?;
    }
    if provider.is_empty() {
        warn!("no classes loaded from the given manifests");
    } else {
        debug!(classes = provider.len(), "class manifests loaded");
    }

    let doc = swagdoc::compile(&provider, &config)?;
    let output = renderer.render(&doc)?;

    match &cli.output {
        Some(target) => {
            let path = output_path(target, renderer.file_extension());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                output = %path.display(),
                paths = doc.paths.len(),
                definitions = doc.definitions.len(),
                "wrote swagger document"
            );
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// An existing directory (or a path ending in a separator) receives
/// `swagger.<ext>`; anything else is the output file itself.
fn output_path(target: &Path, extension: &str) -> PathBuf {
    let is_dir = target.is_dir()
        || target
            .as_os_str()
            .to_string_lossy()
            .ends_with(std::path::is_separator);
    if is_dir {
        target.join(format!("{}.{}", DEFAULT_OUTPUT_STEM, extension))
    } else {
        target.to_path_buf()
    }
}

/// Load the config file (explicit, or `./swagdoc.toml` when present) and
/// apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => Config::from_file(DEFAULT_CONFIG)?,
        None => Config::default(),
    };

    if let Some(controller) = &cli.controller {
        config.controller = controller.clone();
    }
    if let Some(namespace) = &cli.models_namespace {
        config.models_namespace = namespace.clone();
    }
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(base_path) = &cli.base_path {
        config.base_path = base_path.clone();
    }

    if config.controller.is_empty() {
        anyhow::bail!("no controller given: set `controller` in the config or pass --controller");
    }
    Ok(config)
}

/// Resolve `-m` arguments into manifest files: a file is taken as given, a
/// directory contributes its top-level manifests, anything else is a glob.
/// The result is sorted and free of duplicates, so merge order is stable.
fn resolve_manifests(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        let found = if path.is_file() {
            vec![path.to_path_buf()]
        } else if path.is_dir() {
            manifests_in(path)?
        } else {
            glob_manifests(pattern)?
        };
        if found.is_empty() {
            warn!(%pattern, "no manifest files matched");
        }
        files.extend(found);
    }
    Ok(files.into_iter().collect())
}

fn manifests_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_supported_extension(p))
        .collect())
}

fn glob_manifests(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;
    Ok(paths.filter_map(Result::ok).filter(|p| p.is_file()).collect())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn directory_scan_keeps_manifests_only() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("controllers.toml")).unwrap();
        File::create(dir.path().join("models.json")).unwrap();
        File::create(dir.path().join("notes.md")).unwrap();

        let files = resolve_manifests(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["controllers.toml", "models.json"]);
    }

    #[test]
    fn glob_matches_are_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("b.toml")).unwrap();
        File::create(dir.path().join("a.toml")).unwrap();
        let pattern = format!("{}/*.toml", dir.path().display());
        let explicit = dir.path().join("a.toml").to_string_lossy().to_string();

        let files = resolve_manifests(&[pattern, explicit]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.toml"));
        assert!(files[1].ends_with("b.toml"));
    }

    #[test]
    fn output_into_directory_uses_renderer_extension() {
        let dir = TempDir::new().unwrap();
        assert_eq!(output_path(dir.path(), "json"), dir.path().join("swagger.json"));

        let missing = format!("{}/api/", dir.path().display());
        assert_eq!(
            output_path(Path::new(&missing), "json"),
            Path::new(&missing).join("swagger.json")
        );

        let file = dir.path().join("petstore.json");
        assert_eq!(output_path(&file, "json"), file);
    }

    #[test]
    fn supported_extensions() {
        assert!(has_supported_extension(Path::new("classes.toml")));
        assert!(has_supported_extension(Path::new("classes.json")));
        assert!(!has_supported_extension(Path::new("classes.yaml")));
        assert!(!has_supported_extension(Path::new("classes")));
    }
}
