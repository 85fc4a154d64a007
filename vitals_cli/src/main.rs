use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitals_core::classifier::parse_vital;
use vitals_core::*;

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Vital-status classifier and dose calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a heart rate / SpO2 reading
    Classify {
        /// Heart rate in bpm
        #[arg(allow_hyphen_values = true)]
        hr: String,

        /// SpO2 in percent
        #[arg(allow_hyphen_values = true)]
        spo2: String,

        /// Do not append the result to the log file
        #[arg(long)]
        no_log: bool,

        /// Report this status instead of the computed one
        #[arg(long = "override", value_name = "STATUS")]
        override_status: Option<String>,

        /// Trace inputs and result on stderr, even when RUST_LOG is stricter
        #[arg(long, short)]
        verbose: bool,

        /// Override log file path
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Print the reading, normalized values and status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calculate a weight-based medication dose
    Dose {
        /// Body weight in kg
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Age in years
        #[arg(long, allow_negative_numbers = true)]
        age: f64,

        /// Drug name (DRUG_A, DRUG_B, DRUG_C)
        #[arg(long)]
        drug: String,

        /// Emergency use flag (accepted, no effect on the dose)
        #[arg(long)]
        urgent: bool,
    },

    /// Classify a blood pressure reading
    Bp {
        /// Systolic pressure in mmHg
        #[arg(long, allow_negative_numbers = true)]
        systolic: i32,

        /// Diastolic pressure in mmHg
        #[arg(long, allow_negative_numbers = true)]
        diastolic: i32,

        /// Patient age in years, validated before classification
        #[arg(long, allow_negative_numbers = true)]
        age: Option<i32>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Classify { verbose: true, .. });
    vitals_core::logging::init(verbose);

    let config = match cli.config {
        Some(ref path) => {
            tracing::debug!("Using config file {:?}", path);
            Config::load_from(path)?
        }
        None => {
            tracing::debug!(
                "Using default config location {:?}",
                Config::default_config_path()
            );
            Config::load()?
        }
    };

    match cli.command {
        Commands::Classify {
            hr,
            spo2,
            no_log,
            override_status,
            verbose,
            log_file,
            json,
        } => {
            let options = ClassifyOptions {
                log: config.log.enabled && !no_log,
                override_status,
                verbose,
            };
            cmd_classify(&config, &hr, &spo2, &options, log_file, json)
        }
        Commands::Dose {
            weight,
            age,
            drug,
            urgent,
        } => cmd_dose(&config, weight, age, &drug, urgent),
        Commands::Bp {
            systolic,
            diastolic,
            age,
        } => cmd_bp(&config, systolic, diastolic, age),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn cmd_classify(
    config: &Config,
    hr: &str,
    spo2: &str,
    options: &ClassifyOptions,
    log_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let log_path = log_file.unwrap_or_else(|| config.log.path.clone());
    let mut classifier = VitalStatusClassifier::with_sink(config, TextLogSink::new(log_path));

    if !json {
        let status = classifier.classify_input(hr, spo2, options)?;
        println!("{}", status);
        return Ok(());
    }

    let output = match (parse_vital(hr), parse_vital(spo2)) {
        (Some(hr), Some(spo2)) => {
            let assessment = classifier.assess(Reading::new(hr, spo2), options)?;
            serde_json::to_string_pretty(&assessment)?
        }
        _ => {
            let status = classifier.classify_input(hr, spo2, options)?;
            serde_json::to_string_pretty(&serde_json::json!({ "status": status }))?
        }
    };
    println!("{}", output);
    Ok(())
}

fn cmd_dose(config: &Config, weight: f64, age: f64, drug: &str, urgent: bool) -> Result<()> {
    let dose = calc_dose_with(&config.dosing, weight, age, drug, urgent)?;
    println!("{:.2} mg", dose);
    Ok(())
}

fn cmd_bp(config: &Config, systolic: i32, diastolic: i32, age: Option<i32>) -> Result<()> {
    if let Some(age) = age {
        let group = validate_age(age, &config.age)?;
        println!("Age group: {}", group);
    }

    let risk = classify_blood_pressure(systolic, diastolic, &config.blood_pressure);
    println!("Risk level: {}", risk);
    Ok(())
}
