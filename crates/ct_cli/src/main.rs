// ct: load a contest file, score every school, write canonical artifacts.
//
// Exit codes: 0 ok, 2 validation (args, JSON shape, parameter domain),
// 4 I/O, 5 scoring-rule failure.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
    pub const SCORING: u8 = 5;
}

use std::path::Path;
use std::process::ExitCode;

use serde_json::{json, Map, Value};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};
use ct_core::{Params, Subject};
use ct_io::{canonical_json, hasher, IoError, LoadedContest};
use ct_pipeline::{Contest, PipelineError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad JSON shape, bad parameter domain, duplicate schools.
    Validation(String),
    /// Read/write/path failures.
    Io(String),
    /// Scoring rules violated at run time (unscored reads, missing subject, overflow).
    Scoring(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Scoring(m) => write!(f, "scoring: {m}"),
        }
    }
}

impl From<IoError> for MainError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Path(m) => MainError::Io(m),
            e @ (IoError::Json { .. } | IoError::Invalid(_) | IoError::Hash(_)) => {
                MainError::Validation(e.to_string())
            }
        }
    }
}

impl From<PipelineError> for MainError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Params(_) | PipelineError::DuplicateSchool(_) => MainError::Validation(e.to_string()),
            _ => MainError::Scoring(e.to_string()),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("ct: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    init_tracing(args.quiet);

    let outcome = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    match outcome {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            error!("{e}");
            ExitCode::from(map_error(&e))
        }
    }
}

/// stderr subscriber; `RUST_LOG` wins over the default level.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
        MainError::Scoring(_) => exitcodes::SCORING,
    }
}

fn load_inputs(args: &Args) -> Result<(LoadedContest, Params), MainError> {
    let loaded = ct_io::load_contest(&args.input)?;
    let params = match &args.params {
        Some(p) => ct_io::load_params(p)?,
        None => Params::default(),
    };
    Ok((loaded, params))
}

/// Load and check inputs; no scoring, no artifacts.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let (loaded, params) = load_inputs(args)?;
    info!(
        schools = loaded.contest.len(),
        team_size = params.team_size,
        top_grade_cap = params.top_grade_cap,
        "validate-only: inputs OK"
    );
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let (mut loaded, params) = load_inputs(args)?;
    loaded.contest.score_all(&params)?;

    let result = result_artifact(&loaded.contest, &params, &loaded.input_sha256)?;
    let result_path = args.out.join("result.json");
    canonical_json::write_canonical_file(&result_path, &result)?;
    info!(path = %result_path.display(), id = %result["id"].as_str().unwrap_or_default(), "result written");

    if args.wants("json") || args.wants("html") {
        render(args, &loaded)?;
    }
    Ok(())
}

/// `result.json` payload; `id` is `RES:` over the canonical form of everything else.
fn result_artifact(contest: &Contest, params: &Params, input_sha256: &str) -> Result<Value, MainError> {
    let mut schools = Vec::with_capacity(contest.len());
    for school in contest.schools() {
        let mut by_subject = Map::new();
        for subject in Subject::ALL {
            by_subject.insert(subject.token().to_string(), Value::from(school.score(subject)?));
        }
        schools.push(json!({
            "name": school.name().as_str(),
            "level": school.level().token(),
            "total": school.total_score()?,
            "subjects": by_subject,
        }));
    }

    let mut payload = json!({
        "input_sha256": input_sha256,
        "params": { "team_size": params.team_size, "top_grade_cap": params.top_grade_cap },
        "schools": schools,
    });
    let id = hasher::res_id_from_canonical(&payload)?;
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("id".into(), Value::String(id));
    }
    Ok(payload)
}

fn render(args: &Args, loaded: &LoadedContest) -> Result<(), MainError> {
    let model = ct_report::build_model(&loaded.contest, &loaded.input_sha256)
        .map_err(|e| MainError::Scoring(e.to_string()))?;

    if args.wants("json") {
        let v = ct_report::render_json(&model);
        let bytes = serde_json::to_vec_pretty(&v).map_err(|e| MainError::Io(e.to_string()))?;
        write_artifact(&args.out.join("report.json"), &bytes)?;
    }

    if args.wants("html") {
        let html = ct_report::render_html(&model);
        write_artifact(&args.out.join("report.html"), html.as_bytes())?;
    }

    Ok(())
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), MainError> {
    canonical_json::write_atomic(path, bytes).map_err(|e| MainError::Io(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
