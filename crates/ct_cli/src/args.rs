//! Offline CLI argument surface.
//!
//! - No networked paths (any scheme:// and bare http:/https:/file: are rejected)
//! - `--input` is required and must be a local regular file; `--params` likewise when given
//! - Output: `--out` dir, `--render [json|html]*`
//! - `--validate-only` loads and checks inputs without scoring

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ct",
    disable_help_subcommand = true,
    about = "Score schools of an academic contest from a local roster file"
)]
pub struct Args {
    /// Contest JSON: schools, rosters and anonymous score lists.
    #[arg(long)]
    pub input: PathBuf,

    /// Scoring parameters JSON (team size, top-grade cap). Contest defaults when omitted.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Report format(s) to emit next to result.json.
    #[arg(long, value_parser = ["json", "html"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// Load and check inputs only; write nothing.
    #[arg(long)]
    pub validate_only: bool,

    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    pub fn wants(&self, format: &str) -> bool {
        self.render.iter().any(|r| r == format)
    }
}

/// Errors surfaced by argument validation. Messages are short and stable.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Scheme and existence checks, then path normalization.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in [Some(args.input.as_path()), args.params.as_deref(), Some(args.out.as_path())]
        .into_iter()
        .flatten()
    {
        ensure_local_path(p)?;
    }

    ensure_local_exists(&args.input, "--input")?;
    if let Some(p) = &args.params {
        ensure_local_exists(p, "--params")?;
    }

    args.input = normalize_path(&args.input);
    args.params = args.params.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    Ok(args)
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Absolute form of `p`; falls back to CWD-relative when it does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(input: &Path) -> Args {
        Args {
            input: input.to_path_buf(),
            params: None,
            out: PathBuf::from("out"),
            render: vec![],
            validate_only: false,
            quiet: false,
        }
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("HTTPS://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new(r"C:\local\file.json")).is_ok());
        assert!(ensure_local_path(Path::new("/tmp/file.json")).is_ok());
    }

    #[test]
    fn validate_requires_existing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("contest.json");
        assert!(matches!(validate(args_for(&missing)), Err(CliError::NotFound(_))));

        fs::write(&missing, "{}").unwrap();
        let ok = validate(args_for(&missing)).unwrap();
        assert!(ok.input.is_absolute());
        assert!(ok.out.is_absolute());

        let mut with_dir_params = args_for(&missing);
        with_dir_params.params = Some(dir.path().to_path_buf());
        assert!(matches!(validate(with_dir_params), Err(CliError::NotFound(_))));
    }

    #[test]
    fn render_flags_parse() {
        let a = Args::try_parse_from(["ct", "--input", "c.json", "--render", "json", "html"]).unwrap();
        assert!(a.wants("json") && a.wants("html"));
        assert!(Args::try_parse_from(["ct", "--input", "c.json", "--render", "pdf"]).is_err());
        assert!(Args::try_parse_from(["ct"]).is_err());
    }
}
