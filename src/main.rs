use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use git_semver_tag::config;
use git_semver_tag::git::Git2Repository;
use git_semver_tag::logging;
use git_semver_tag::tagging::{self, TagRequest, Tagger};
use git_semver_tag::ui;
use git_semver_tag::version::{FixedVersion, VersionFile, VersionSource};

#[derive(clap::Parser)]
#[command(
    name = "git-semver-tag",
    about = "Tag the checked out commit with its semantic version"
)]
struct Args {
    #[arg(short = 'C', long, default_value = ".", help = "Repository to tag")]
    path: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Tag even if HEAD already has a version tag")]
    force: bool,

    #[arg(long, help = "Preview the tag without creating it")]
    dry_run: bool,

    #[arg(long, value_name = "VERSION", help = "Use this version instead of the version file")]
    set: Option<String>,

    #[arg(long, value_name = "FILE", help = "Read the version from this file")]
    version_file: Option<PathBuf>,

    #[arg(long, help = "Tagger name (overrides configuration)")]
    tagger_name: Option<String>,

    #[arg(long, help = "Tagger email (overrides configuration)")]
    tagger_email: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-semver-tag {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init();

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    let repo = Git2Repository::discover(&args.path)?;

    let source: Box<dyn VersionSource> = match (args.set, args.version_file) {
        (Some(version), _) => Box::new(FixedVersion::new(version)),
        (None, Some(file)) => Box::new(VersionFile::new(file)),
        (None, None) => {
            let root = repo
                .workdir()
                .ok_or_else(|| anyhow::anyhow!("bare repository: pass --set or --version-file"))?;
            Box::new(VersionFile::new(config.version.file_in(&root)))
        }
    };

    let mut tagger = Tagger::from(&config.tagger);
    if let Some(name) = args.tagger_name {
        tagger.name = name;
    }
    if let Some(email) = args.tagger_email {
        tagger.email = email;
    }

    let request = TagRequest::new(tagger)
        .force(args.force)
        .dry_run(args.dry_run);

    let outcome = tagging::tag(&repo, &source, &request)?;
    ui::display_outcome(&outcome);

    Ok(())
}
