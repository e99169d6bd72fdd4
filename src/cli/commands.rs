//! CLI command implementations
//!
//! `validate` checks any number of specifications and reports each one.
//! `load` validates a single specification (STEP 1) and then loads it into
//! the file record store of a site (STEP 2).

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::args::{Cli, Command};
use super::config::{validate_site, Config};
use super::errors::{CliError, CliResult};
use super::io::{write_banner, write_bullets, write_report, write_summary};
use crate::loader::{ConsoleObserver, DocTypeLoader, LoadReport};
use crate::observability::{Logger, Severity};
use crate::record::DOCTYPE_KIND;
use crate::spec::DocTypeValidator;
use crate::store::FileRecordStore;

/// Outcome of validating a batch of files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// `Ok` only if every file passed.
    pub fn into_result(self) -> CliResult<()> {
        if self.failed == 0 {
            Ok(())
        } else {
            Err(CliError::validation_failed(format!(
                "{} of {} file(s) failed validation",
                self.failed, self.total
            )))
        }
    }
}

/// Options for `load`, after flags and config are merged
#[derive(Debug, Clone)]
pub struct LoadArgs {
    pub file: PathBuf,
    pub site: String,
    pub store_root: PathBuf,
    pub overwrite: bool,
    pub validate_only: bool,
    pub no_validate: bool,
    pub schema: Option<PathBuf>,
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Info);
    }
    let config = Config::resolve(cli.config.as_deref())?;
    let mut stdout = io::stdout();
    run_command(cli.command, &config, &mut stdout)
}

/// Run a specific command
pub fn run_command<W: Write>(cmd: Command, config: &Config, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Validate { files, schema } => {
            let schema = schema.or_else(|| config.schema_path.clone());
            validate(&files, schema.as_deref(), out)?.into_result()
        }
        Command::Load {
            file,
            site,
            overwrite,
            validate_only,
            no_validate,
            schema,
            store_root,
        } => {
            let args = LoadArgs {
                file,
                site: site.unwrap_or_else(|| config.default_site.clone()),
                store_root: store_root.unwrap_or_else(|| config.store_root.clone()),
                overwrite,
                validate_only,
                no_validate,
                schema: schema.or_else(|| config.schema_path.clone()),
            };
            load(&args, out).map(|_| ())
        }
    }
}

fn build_validator(schema: Option<&Path>) -> CliResult<DocTypeValidator> {
    let validator = match schema {
        Some(path) => DocTypeValidator::from_schema_file(path),
        None => DocTypeValidator::new(),
    };
    validator.map_err(|e| CliError::schema_error(e.to_string()))
}

/// Validates every file, reporting each one to `out`.
///
/// A missing or unreadable file counts as a failure and does not stop the
/// batch. A summary is written when more than one file is given.
pub fn validate<W: Write>(
    files: &[PathBuf],
    schema: Option<&Path>,
    out: &mut W,
) -> CliResult<BatchSummary> {
    let validator = build_validator(schema)?;

    let mut summary = BatchSummary {
        total: files.len(),
        passed: 0,
        failed: 0,
    };

    for path in files {
        if !path.exists() {
            writeln!(out, "\nERROR - File not found: {}", path.display())?;
            summary.failed += 1;
            continue;
        }

        write_banner(out, &format!("Validating: {}", display_name(path)))?;

        match validator.validate_file(path) {
            Ok(report) => {
                write_report(out, &report, "ERROR - Validation failed:")?;
                if report.is_valid() {
                    writeln!(out, "\nSUCCESS - YAML validation passed!")?;
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
            }
            Err(e) => {
                write_bullets(out, "ERROR - Validation failed:", &[e.to_string()])?;
                summary.failed += 1;
            }
        }
    }

    if summary.total > 1 {
        write_summary(out, summary.total, summary.passed, summary.failed)?;
    }

    Ok(summary)
}

/// Validates (unless skipped) and loads one specification.
///
/// Returns `None` for `--validate-only`.
pub fn load<W: Write>(args: &LoadArgs, out: &mut W) -> CliResult<Option<LoadReport>> {
    validate_site(&args.site)?;

    if !args.file.exists() {
        writeln!(out, "ERROR - File not found: {}", args.file.display())?;
        return Err(CliError::file_not_found(&args.file));
    }

    if !args.no_validate {
        write_banner(out, "STEP 1: YAML VALIDATION")?;

        let validator = build_validator(args.schema.as_deref())?;
        let report = match validator.validate_file(&args.file) {
            Ok(report) => report,
            Err(e) => {
                write_bullets(out, "ERROR - Validation failed with errors:", &[e.to_string()])?;
                return Err(e.into());
            }
        };

        write_report(out, &report, "ERROR - Validation failed with errors:")?;
        if !report.is_valid() {
            writeln!(out, "\nPlease fix the errors and try again.")?;
            return Err(CliError::validation_failed(format!(
                "{} validation error(s) in {}",
                report.errors.len(),
                args.file.display()
            )));
        }

        writeln!(out, "\nSUCCESS - Validation passed!")?;

        if args.validate_only {
            return Ok(None);
        }
    }

    write_banner(out, "STEP 2: LOADING DOCTYPE")?;

    let store = FileRecordStore::new(&args.store_root, &args.site);
    let result = {
        let mut loader = DocTypeLoader::new(store).with_observer(ConsoleObserver::new(&mut *out));
        loader.load_from_file(&args.file, args.overwrite)
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            writeln!(out, "\nERROR - Error loading DocType: {}", e)?;
            return Err(e.into());
        }
    };

    let stored_at = FileRecordStore::new(&args.store_root, &args.site)
        .record_path(DOCTYPE_KIND, &report.name);

    write_banner(out, "SUCCESS")?;
    let verb = if report.overwritten { "replaced" } else { "created" };
    writeln!(
        out,
        "DocType '{}' has been {} successfully!",
        report.name, verb
    )?;
    writeln!(out, "\nSite: {}", args.site)?;
    writeln!(out, "Stored at: {}", stored_at.display())?;

    Ok(Some(report))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
