//! tekton-normalize - Tekton/Kubernetes manifest normalizer CLI.
//!
//! With no paths, reads one YAML stream from stdin and writes the rewritten
//! stream to stdout. With paths, each file is processed independently and
//! written to stdout, or back to the file when `--in-place` is set.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tekton_normalize::{Error, Normalizer};

/// Normalize Tekton/Kubernetes YAML manifests.
#[derive(Debug, Parser)]
#[command(name = "tekton-normalize", version, about)]
struct Cli {
    /// Files to process; reads stdin when none are given.
    paths: Vec<PathBuf>,

    /// Overwrite each file in place instead of writing to stdout.
    #[arg(short, long)]
    in_place: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> ExitCode {
    let normalizer = Normalizer::with_defaults();

    if cli.paths.is_empty() {
        return match process_stdin(&normalizer) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!("{}", err);
                ExitCode::FAILURE
            }
        };
    }

    let mut failed = false;
    for path in &cli.paths {
        // Missing files are skipped with a warning and do not affect the
        // exit status; the remaining paths are still processed.
        if !path.exists() {
            tracing::warn!(path = %path.display(), "skipping missing file");
            continue;
        }

        if let Err(err) = process_file(&normalizer, path, cli.in_place) {
            tracing::error!(path = %path.display(), "{}", err);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn process_stdin(normalizer: &Normalizer) -> Result<(), Error> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| Error::io("<stdin>", e))?;

    let output = normalizer.normalize_str(&input)?;
    io::stdout()
        .write_all(output.as_bytes())
        .map_err(|e| Error::io("<stdout>", e))?;
    Ok(())
}

fn process_file(normalizer: &Normalizer, path: &Path, in_place: bool) -> Result<(), Error> {
    let input = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let output = normalizer.normalize_str(&input)?;

    if in_place {
        write_atomic(path, &output)
    } else {
        io::stdout()
            .write_all(output.as_bytes())
            .map_err(|e| Error::io("<stdout>", e))
    }
}

/// Writes through a temp file in the same directory and renames it over the
/// original, so an interrupted write never leaves a half-written file in
/// place of the source.
fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
