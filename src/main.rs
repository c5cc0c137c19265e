// Command line front end: recognised passport text in, extraction report out.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{error, warn};

use luppa_extract::{
    models::{ExtractionReport, ValidationIssue},
    validation::DateValidator,
    CenturyRule, ExtractError, ExtractionConfig, ExtractionPipeline, SexMarkerPolicy,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FillerSex {
    /// Legacy reading: a filler in the sex position means Female
    Female,
    /// A filler in the sex position means Unspecified
    Unspecified,
}

#[derive(Debug, Parser)]
#[command(name = "luppa-extract", version, about = "Extract passport fields from OCR text")]
struct Cli {
    /// Text file produced by the OCR engine; reads stdin when omitted
    input: Option<PathBuf>,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Remap common OCR confusions on the MRZ path (lossy)
    #[arg(long)]
    noise_correction: bool,

    /// Two-digit years up to this value are 20YY, above it 19YY
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=99))]
    century_pivot: Option<u8>,

    /// How a filler sex marker in the MRZ is decoded
    #[arg(long, value_enum)]
    filler_sex: Option<FillerSex>,

    /// Include the recognised text in the report
    #[arg(long)]
    include_raw: bool,

    /// Add calendar and expiry diagnostics to the report
    #[arg(long)]
    check_dates: bool,

    /// Print a human readable summary instead of JSON
    #[arg(long)]
    text: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Exit with status 2 when the document could not be read
    #[arg(long)]
    fail_on_unreadable: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ExtractionConfig, ExtractError> {
        let mut config = match &self.config {
            Some(path) => ExtractionConfig::from_json_file(path)?,
            None => ExtractionConfig::default(),
        };

        if self.noise_correction {
            config.noise_correction = true;
        }
        if let Some(pivot) = self.century_pivot {
            config.century = CenturyRule::Pivot(pivot);
        }
        match self.filler_sex {
            Some(FillerSex::Female) => config.sex_marker = SexMarkerPolicy::Legacy,
            Some(FillerSex::Unspecified) => config.sex_marker = SexMarkerPolicy::FillerUnspecified,
            None => {}
        }

        Ok(config)
    }

    fn read_input(&self) -> Result<String, ExtractError> {
        match &self.input {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

fn print_summary(report: &ExtractionReport) {
    let record = &report.record;

    println!("===============================================");
    println!("      PASSPORT EXTRACTION REPORT");
    println!("===============================================\n");

    if !report.is_readable() {
        println!("Could not read document. No identity fields are reported.");
    } else {
        println!("PASSPORT INFORMATION ({:?}):", record.source_confidence);
        println!("  Surname: {}", record.surname);
        println!("  Given Names: {}", record.given_names);
        println!("  Document Number: {}", record.document_number);
        println!("  Nationality: {}", record.nationality);
        println!("  Date of Birth: {}", record.date_of_birth);
        println!("  Sex: {:?}", record.sex);
        println!("  Date of Expiry: {}", record.date_of_expiry);
    }

    if !report.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &report.issues {
            println!("  - [{:?}] {}", issue.issue_type, issue.message);
        }
    }

    println!("\nInput SHA-256: {}", report.input_sha256);
}

fn date_issues(report: &ExtractionReport) -> Vec<ValidationIssue> {
    let today = Local::now().naive_local().date();
    DateValidator::validate(&report.record, today).issues
}

fn run(cli: &Cli) -> Result<bool, ExtractError> {
    let config = cli.load_config()?;
    let text = cli.read_input()?;

    let pipeline = ExtractionPipeline::try_new(config)?;
    let mut report = pipeline.report(&text);

    if !report.is_readable() {
        warn!("document could not be read (input_sha256={})", report.input_sha256);
    } else if cli.check_dates {
        let issues = date_issues(&report);
        report = report.with_issues(issues);
    }
    if cli.include_raw {
        report = report.with_raw_text(&text);
    }

    if cli.text {
        print_summary(&report);
    } else {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        let json = json.map_err(|e| ExtractError::Serialization(e.to_string()))?;
        println!("{}", json);
    }

    Ok(report.is_readable())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) if cli.fail_on_unreadable => ExitCode::from(2),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
