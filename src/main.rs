use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bump_version::analyzer::ChangeClassifier;
use bump_version::ci_output::CiOutput;
use bump_version::cli::{run_bump_workflow, BumpWorkflowArgs};
use bump_version::config;
use bump_version::domain::{ReleaseStrategy, TagPrefix};
use bump_version::git::Git2Repository;
use bump_version::ui;
use bump_version::version_file::{FileFormat, VersionFile};

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    version,
    about = "Compute the next semantic version of a monorepo component from conventional commits"
)]
struct Args {
    #[arg(long, help = "Path to check for changes")]
    path: Option<String>,

    #[arg(long, help = "Prefix for git tags (e.g., backend/v)")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Version file to update; selects file mode without --tag-prefix")]
    file: Option<PathBuf>,

    #[arg(long = "type", value_name = "TYPE", help = "Type of version file (text or json)")]
    file_type: Option<String>,

    #[arg(long, help = "Calculate version but do not write to file")]
    dry_run: bool,

    #[arg(long, allow_hyphen_values = true, help = "Suffix to append to the new version (e.g., -beta.1)")]
    prerelease_suffix: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Repository to inspect")]
    repo: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(args.verbose);

    let Some(path) = args.path.as_deref() else {
        usage_error("--path is required");
    };

    let version_file = match (&args.file, args.file_type.as_deref()) {
        (Some(file), Some(file_type)) => match file_type.parse::<FileFormat>() {
            Ok(format) => Some(VersionFile::new(file, format)),
            Err(e) => usage_error(&e.to_string()),
        },
        (None, None) => None,
        _ => usage_error("--file and --type must be given together"),
    };

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => fail(&format!("Error loading config: {}", e)),
    };

    let classifier = match ChangeClassifier::new(&config.classifier) {
        Ok(classifier) => classifier,
        Err(e) => fail(&e.to_string()),
    };

    let repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => repo,
        Err(e) => fail(&format!("Git repository error: {}", e)),
    };

    let cwd = std::env::current_dir()?;
    let scope = repo_path(&repo, Path::new(path), &cwd);

    let strategy = match (&args.tag_prefix, &version_file) {
        (Some(prefix), _) => ReleaseStrategy::Tag(TagPrefix::new(prefix.as_str())),
        (None, Some(file)) => ReleaseStrategy::File {
            file: file.clone(),
            repo_path: repo_path(&repo, &file.path, &cwd),
        },
        (None, None) => usage_error("either --tag-prefix or --file with --type is required"),
    };

    let workflow_args = BumpWorkflowArgs {
        path: scope,
        strategy,
        target: version_file,
        dry_run: args.dry_run,
        prerelease_suffix: args.prerelease_suffix.clone(),
        ci_output: CiOutput::from_env(&config.ci.output_env),
    };
    tracing::debug!(?workflow_args, "starting bump workflow");

    if let Err(e) = run_bump_workflow(&repo, &classifier, &workflow_args) {
        fail(&e.to_string());
    }

    Ok(())
}

/// Parse the command line; malformed flags exit 1 like every other usage error.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}

fn repo_path(repo: &Git2Repository, path: &Path, cwd: &Path) -> String {
    match repo.repo_relative(path, cwd) {
        Ok(relative) => relative,
        Err(e) => fail(&e.to_string()),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn usage_error(message: &str) -> ! {
    ui::display_error(message);
    ui::display_usage();
    std::process::exit(1);
}

fn fail(message: &str) -> ! {
    ui::display_error(message);
    std::process::exit(1);
}
