use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use form_spec::{
    AnswerSet, FormSpec, ResponseRecord, SubmissionError, ValidationResult, answers_schema,
    build_render_payload, export_csv, export_json, prepare_submission, render_json, render_text,
    resolve_visibility, validate,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Form evaluation helper for Airtable-backed forms",
    long_about = "Previews conditional visibility, validates submissions, builds outgoing \
                  record payloads, and exports stored responses."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PreviewFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show which questions are visible and required for a given answer set.
    Preview {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON file containing in-progress answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Render output mode.
        #[arg(long, value_enum, default_value_t = PreviewFormat::Text)]
        format: PreviewFormat,
    },
    /// Validate a final answer set against the form.
    Validate {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Dry-run a submission: validate and print the outgoing record fields.
    Submit {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Check a form definition for structural problems.
    Check {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Print the JSON Schema for answers to currently-visible questions.
    Schema {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
    },
    /// Export stored responses as CSV or JSON.
    Export {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// JSON file containing an array of stored responses.
        #[arg(long, value_name = "RESPONSES")]
        responses: PathBuf,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Include responses whose upstream record was deleted.
        #[arg(long)]
        include_deleted: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Preview {
            form,
            answers,
            format,
        } => run_preview(form, answers, format),
        Command::Validate { form, answers } => run_validate(form, answers),
        Command::Submit { form, answers } => run_submit(form, answers),
        Command::Check { form } => run_check(form),
        Command::Schema { form, answers } => run_schema(form, answers),
        Command::Export {
            form,
            responses,
            format,
            include_deleted,
        } => run_export(form, responses, format, include_deleted),
    }
}

fn load_form(path: &PathBuf) -> CliResult<FormSpec> {
    let raw = fs::read_to_string(path)?;
    Ok(FormSpec::from_json(&raw)?)
}

fn load_answers(path: Option<&PathBuf>) -> CliResult<AnswerSet> {
    let Some(path) = path else {
        return Ok(AnswerSet::new());
    };
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    Ok(AnswerSet::from_json(&value))
}

fn run_preview(
    form_path: PathBuf,
    answers_path: Option<PathBuf>,
    format: PreviewFormat,
) -> CliResult<()> {
    let spec = load_form(&form_path)?;
    let answers = load_answers(answers_path.as_ref())?;
    let payload = build_render_payload(&spec, &answers);
    match format {
        PreviewFormat::Text => println!("{}", render_text(&payload)),
        PreviewFormat::Json => println!("{}", serde_json::to_string_pretty(&render_json(&payload))?),
    }
    Ok(())
}

fn run_validate(form_path: PathBuf, answers_path: PathBuf) -> CliResult<()> {
    let spec = load_form(&form_path)?;
    let answers = load_answers(Some(&answers_path))?;

    let result = validate(&spec, &answers);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn run_submit(form_path: PathBuf, answers_path: PathBuf) -> CliResult<()> {
    let spec = load_form(&form_path)?;
    let answers = load_answers(Some(&answers_path))?;

    match prepare_submission(&spec, &answers) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(SubmissionError::Invalid(result)) => {
            describe_validation(&result);
            Err("submission failed validation".into())
        }
        Err(err) => Err(err.to_string().into()),
    }
}

fn run_check(form_path: PathBuf) -> CliResult<()> {
    let spec = load_form(&form_path)?;
    let issues = spec.issues();
    if issues.is_empty() {
        println!("Form definition looks good.");
        return Ok(());
    }
    println!("Found {} issue(s):", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    Err("form definition has issues".into())
}

fn run_schema(form_path: PathBuf, answers_path: Option<PathBuf>) -> CliResult<()> {
    let spec = load_form(&form_path)?;
    let answers = load_answers(answers_path.as_ref())?;
    let visibility = resolve_visibility(&spec, &answers);
    println!(
        "{}",
        serde_json::to_string_pretty(&answers_schema(&spec, &visibility))?
    );
    Ok(())
}

fn run_export(
    form_path: PathBuf,
    responses_path: PathBuf,
    format: ExportFormat,
    include_deleted: bool,
) -> CliResult<()> {
    let spec = load_form(&form_path)?;
    let raw = fs::read_to_string(&responses_path)?;
    let mut responses: Vec<ResponseRecord> = serde_json::from_str(&raw)?;
    if !include_deleted {
        responses.retain(|response| !response.deleted_in_airtable);
    }

    match format {
        ExportFormat::Csv => println!("{}", export_csv(&spec, &responses)),
        ExportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&export_json(&spec, &responses))?)
        }
    }
    Ok(())
}

fn describe_validation(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!(
                "  {} - {}",
                error.question_key.as_deref().unwrap_or("<unknown>"),
                error.message
            );
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required answers: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.unknown_fields.is_empty() {
        println!(
            "Unknown answer fields: {}",
            result.unknown_fields.join(", ")
        );
    }
}
