//! The compiler driver: reads a source file, drives lex → parse → check →
//! print, and reports the single resulting diagnostic or the printed AST.
//!
//! Every stage below this crate is fail-fast and carries its own typed
//! error; this crate's job is just to sequence them and turn whichever one
//! fires first into the one line of output the CLI contract promises.

use std::path::PathBuf;

use anyhow::Context as _;
use thiserror::Error;

use cc_util::{Handler, Interner};

/// Driver configuration, built from `std::env::args()` by hand — the CLI
/// contract is a single positional argument, so `clap` would be more
/// machinery than the surface warrants. Mirrors the shape of the teacher's
/// own driver config (`verbose`, `working_dir`) even though this front-end
/// only ever reads `input_file`.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: Option<PathBuf>,
    pub verbose: bool,
    pub working_dir: PathBuf,
}

impl Config {
    /// Builds a `Config` from a raw argument iterator (`std::env::args()`
    /// at the call site); `args[0]` is assumed to be the program name and
    /// is skipped. The first non-flag argument is the source path; any
    /// further positional arguments are ignored, since multi-file
    /// compilation is a non-goal.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut args = args.into_iter();
        args.next();
        let mut input_file = None;
        let mut verbose = false;
        for arg in args {
            match arg.as_str() {
                "-v" | "--verbose" => verbose = true,
                _ if input_file.is_none() => input_file = Some(PathBuf::from(arg)),
                _ => {}
            }
        }
        Self {
            input_file,
            verbose,
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Error)]
enum DriverError {
    #[error("error: no filepath specified")]
    NoFilepath,
}

/// Runs the full pipeline. On success, returns the printed AST. On
/// failure — missing argument, read failure, parse failure, or
/// type-check failure — returns the single diagnostic line the fail-fast
/// design produces, already formatted for display.
///
/// Internally this collapses the pipeline's heterogeneous failure modes
/// (a missing CLI argument, an [`std::io::Error`], a lex/parse/check
/// [`Handler`] diagnostic) into one [`anyhow::Error`] chain via `?`, the
/// way `faxc-drv` depends on `anyhow` at its top level to do the same;
/// the public signature stays a plain string since that is all the CLI
/// contract ever surfaces.
pub fn compile(config: &Config) -> Result<String, String> {
    run(config).map_err(|err| err.to_string())
}

fn run(config: &Config) -> anyhow::Result<String> {
    let path = config.input_file.as_deref().ok_or(DriverError::NoFilepath)?;

    if config.verbose {
        tracing::debug!(path = %path.display(), "reading source file");
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("error: could not read '{}'", path.display()))?;

    let mut interner = Interner::new();
    let mut handler = Handler::new();

    let program = {
        let mut parser = cc_par::Parser::new(&source, &mut interner, &mut handler);
        parser.parse_program()
    };
    let program = program.map_err(|()| anyhow::anyhow!(format_diagnostic(&handler)))?;

    if config.verbose {
        tracing::debug!(functions = program.functions.len(), "parsed program");
    }

    cc_sem::check_program(&program, &interner, &mut handler)
        .map_err(|()| anyhow::anyhow!(format_diagnostic(&handler)))?;

    Ok(cc_print::print_program(&program, &interner))
}

fn format_diagnostic(handler: &Handler) -> String {
    match handler.first() {
        Some(diagnostic) => diagnostic.to_string(),
        None => "error: compilation failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn config_for(source: &str) -> (tempfile::NamedTempFile, Config) {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(source.as_bytes()).expect("write source");
        let config = Config {
            input_file: Some(file.path().to_path_buf()),
            verbose: false,
            working_dir: PathBuf::from("."),
        };
        (file, config)
    }

    #[test]
    fn missing_filepath_is_reported() {
        let config = Config { input_file: None, verbose: false, working_dir: PathBuf::from(".") };
        assert_eq!(compile(&config), Err("error: no filepath specified".to_string()));
    }

    #[test]
    fn unreadable_path_is_reported() {
        let config = Config {
            input_file: Some(PathBuf::from("/nonexistent/path/does-not-exist.c")),
            verbose: false,
            working_dir: PathBuf::from("."),
        };
        assert!(compile(&config).is_err());
    }

    #[test]
    fn successful_compile_prints_the_ast() {
        let (_file, config) = config_for("int main(void) { return 0; }");
        let output = compile(&config).expect("compiles");
        assert!(output.starts_with("function\n"));
        assert!(output.contains("return"));
    }

    #[test]
    fn parse_failure_is_reported() {
        let (_file, config) = config_for("int main(void) { return 0 }");
        assert!(compile(&config).is_err());
    }

    #[test]
    fn type_check_failure_is_reported() {
        let (_file, config) = config_for("int main(void) { int x; return x; }");
        let err = compile(&config).expect_err("should fail definite-assignment check");
        assert!(err.starts_with("error:"));
    }
}
