use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use bmirs::bmi;
use bmirs::calories;
use bmirs::config::AppConfig;
use bmirs::error::BmirsError;
use bmirs::history::{FormSession, HistoryStore};
use bmirs::ideal_weight;
use bmirs::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use bmirs::models::{
    ActivityLevel, BmiCategory, BmiResult, Gender, HeightMeasurement, HeightUnit, MetricInputs,
    RecordMetadata, WeightMeasurement, WeightUnit,
};
use bmirs::share;
use bmirs::units;

/// bmirs - BMI calculator CLI
///
/// Computes BMI, ideal-weight estimates and daily calorie needs from
/// height, weight, age, gender and activity level, converting between
/// metric and imperial units along the way.
#[derive(Parser)]
#[command(name = "bmirs")]
#[command(author = "bmirs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "BMI, unit conversion and calorie needs CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI, ideal weight and calorie needs
    Calculate {
        /// Height value (in the height unit; decimal feet like 5.9 mean 5'9")
        #[arg(long)]
        height: Option<Decimal>,

        /// Height unit (cm, m, mm, ft, in)
        #[arg(long)]
        height_unit: Option<HeightUnit>,

        /// Feet part when entering height as a feet/inches pair
        #[arg(long)]
        feet: Option<Decimal>,

        /// Inches part when entering height as a feet/inches pair
        #[arg(long)]
        inches: Option<Decimal>,

        /// Weight value (in the weight unit)
        #[arg(long)]
        weight: Option<Decimal>,

        /// Weight unit (kg, g, lbs, oz, st)
        #[arg(long)]
        weight_unit: Option<WeightUnit>,

        /// Age in years (15-120)
        #[arg(long)]
        age: Option<u16>,

        /// Gender (male, female)
        #[arg(long)]
        gender: Option<Gender>,

        /// Activity level (sedentary, lightly, moderately, very, extremely)
        #[arg(long)]
        activity: Option<ActivityLevel>,

        /// Save the result to BMI history
        #[arg(short, long)]
        save: bool,
    },

    /// Convert a height or weight value between units
    Convert {
        #[command(subcommand)]
        target: ConvertTarget,
    },

    /// Estimate ideal weight from height and gender
    IdealWeight {
        /// Height value (in the height unit)
        #[arg(long)]
        height: Option<Decimal>,

        /// Height unit (cm, m, mm, ft, in)
        #[arg(long)]
        height_unit: Option<HeightUnit>,

        /// Feet part when entering height as a feet/inches pair
        #[arg(long)]
        feet: Option<Decimal>,

        /// Inches part when entering height as a feet/inches pair
        #[arg(long)]
        inches: Option<Decimal>,

        /// Gender (male, female)
        #[arg(long)]
        gender: Gender,
    },

    /// Estimate daily calorie needs
    Calories {
        /// Height value (in the height unit)
        #[arg(long)]
        height: Decimal,

        /// Height unit (cm, m, mm, ft, in)
        #[arg(long, default_value = "cm")]
        height_unit: HeightUnit,

        /// Weight value (in the weight unit)
        #[arg(long)]
        weight: Decimal,

        /// Weight unit (kg, g, lbs, oz, st)
        #[arg(long, default_value = "kg")]
        weight_unit: WeightUnit,

        /// Age in years (15-120)
        #[arg(long)]
        age: u16,

        /// Gender (male, female)
        #[arg(long)]
        gender: Gender,

        /// Activity level (sedentary, lightly, moderately, very, extremely)
        #[arg(long, default_value = "sedentary")]
        activity: ActivityLevel,
    },

    /// Show or clear saved BMI history
    History {
        /// Remove all saved records
        #[arg(long)]
        clear: bool,

        /// Number of recent records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Print a shareable summary of the most recent saved result
    Share {
        /// Print the multi-line copy format instead of the one-liner
        #[arg(long)]
        copy: bool,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConvertTarget {
    /// Convert a height value
    Height {
        /// Value to convert (decimal feet like 5.9 mean 5'9")
        #[arg(long)]
        value: Decimal,

        /// Source unit (cm, m, mm, ft, in)
        #[arg(long)]
        from: HeightUnit,

        /// Target unit (cm, m, mm, ft, in, ftin)
        #[arg(long)]
        to: String,
    },

    /// Convert a weight value
    Weight {
        /// Value to convert
        #[arg(long)]
        value: Decimal,

        /// Source unit (kg, g, lbs, oz, st)
        #[arg(long)]
        from: WeightUnit,

        /// Target unit (kg, g, lbs, oz, st, stlb)
        #[arg(long)]
        to: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: LogLevel::from_verbosity(cli.verbose),
        format: LogFormat::Compact,
        file_path: None,
    };
    init_logging(&log_config)?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    let outcome = match cli.command {
        Commands::Calculate {
            height,
            height_unit,
            feet,
            inches,
            weight,
            weight_unit,
            age,
            gender,
            activity,
            save,
        } => run_calculate(
            &config,
            CalculateArgs {
                height,
                height_unit,
                feet,
                inches,
                weight,
                weight_unit,
                age,
                gender,
                activity,
                save,
            },
        ),
        Commands::Convert { target } => run_convert(target),
        Commands::IdealWeight {
            height,
            height_unit,
            feet,
            inches,
            gender,
        } => run_ideal_weight(&config, height, height_unit, feet, inches, gender),
        Commands::Calories {
            height,
            height_unit,
            weight,
            weight_unit,
            age,
            gender,
            activity,
        } => run_calories(
            height,
            height_unit,
            weight,
            weight_unit,
            age,
            gender,
            activity,
        ),
        Commands::History { clear, limit } => run_history(&config, clear, limit),
        Commands::Share { copy } => run_share(&config, copy),
        Commands::Config { list, set, get } => return run_config(config, list, set, get),
    };

    // Input problems are recovered here: show the message, exit cleanly
    if let Err(err) = outcome {
        match err.downcast::<BmirsError>() {
            Ok(bmirs_err) => {
                tracing::warn!(error = %bmirs_err, severity = ?bmirs_err.severity(), "command rejected");
                eprintln!("{}", bmirs_err.user_message().red());
                std::process::exit(1);
            }
            Err(other) => return Err(other),
        }
    }

    Ok(())
}

struct CalculateArgs {
    height: Option<Decimal>,
    height_unit: Option<HeightUnit>,
    feet: Option<Decimal>,
    inches: Option<Decimal>,
    weight: Option<Decimal>,
    weight_unit: Option<WeightUnit>,
    age: Option<u16>,
    gender: Option<Gender>,
    activity: Option<ActivityLevel>,
    save: bool,
}

/// Fill omitted calculate flags from the saved session, then validate,
/// derive, render, and persist
fn run_calculate(config: &AppConfig, args: CalculateArgs) -> Result<()> {
    let store = HistoryStore::open(&config.settings.data_dir)?;
    let session = store.load_session().unwrap_or_default();

    let height_unit = args
        .height_unit
        .or(session.height_unit)
        .unwrap_or(config.settings.default_height_unit);
    let weight_unit = args
        .weight_unit
        .or(session.weight_unit)
        .unwrap_or(config.settings.default_weight_unit);
    let height = args.height.or(session.height);
    let feet = args.feet.or(session.feet);
    let inches = args.inches.or(session.inches);
    let weight = args.weight.or(session.weight);
    let age = args.age.or(session.age).ok_or_else(|| missing("age"))?;
    let gender = args.gender.or(session.gender);
    let activity = args.activity.or(session.activity);

    let height_measurement = resolve_height(height, height_unit, feet, inches)?;
    let weight_value = weight.ok_or_else(|| missing("weight"))?;

    let height_cm = height_measurement.to_cm()?;
    let weight_kg = WeightMeasurement::from_value(weight_value, weight_unit).to_kg()?;

    let inputs = MetricInputs::new(height_cm, weight_kg, age, gender, activity)?;
    let result = bmi::calculate(inputs.height_cm, inputs.weight_kg)?;
    let ideal = ideal_weight::estimate(inputs.height_cm, inputs.gender)?;
    let needs = calories::estimate(&inputs);

    render_result(&result, &inputs);
    render_ideal_weight(&ideal);
    render_calories(&needs);

    // Form persistence: remember what was entered for the next run
    store.save_session(&FormSession {
        height,
        height_unit: Some(height_unit),
        feet,
        inches,
        weight: Some(weight_value),
        weight_unit: Some(weight_unit),
        age: Some(age),
        gender: Some(inputs.gender),
        activity: Some(inputs.activity),
    })?;

    if args.save {
        let metadata = RecordMetadata {
            height,
            height_unit: Some(height_unit),
            weight: Some(weight_value),
            weight_unit: Some(weight_unit),
            age: Some(age),
            gender: Some(inputs.gender),
            activity: Some(inputs.activity),
        };
        store.save_result(&result, metadata)?;
        println!("{}", "✓ BMI record saved".green());
    }

    Ok(())
}

fn run_convert(target: ConvertTarget) -> Result<()> {
    match target {
        ConvertTarget::Height { value, from, to } => {
            let cm = HeightMeasurement::from_value(value, from).to_cm()?;
            let rendered = if to.eq_ignore_ascii_case("ftin") {
                units::format_feet_inches(cm)
            } else {
                let unit: HeightUnit = to
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                format!("{} {}", units::height_from_cm(cm, unit)?, unit)
            };
            println!("{} {} = {}", value, from, rendered.bold());
        }
        ConvertTarget::Weight { value, from, to } => {
            let kg = WeightMeasurement::from_value(value, from).to_kg()?;
            let rendered = if to.eq_ignore_ascii_case("stlb") {
                units::format_stones_pounds(kg)
            } else {
                let unit: WeightUnit = to
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                format!("{} {}", units::weight_from_kg(kg, unit)?, unit)
            };
            println!("{} {} = {}", value, from, rendered.bold());
        }
    }
    Ok(())
}

fn run_ideal_weight(
    config: &AppConfig,
    height: Option<Decimal>,
    height_unit: Option<HeightUnit>,
    feet: Option<Decimal>,
    inches: Option<Decimal>,
    gender: Gender,
) -> Result<()> {
    let unit = height_unit.unwrap_or(config.settings.default_height_unit);
    let measurement = resolve_height(height, unit, feet, inches)?;
    let height_cm = measurement.to_cm()?;
    let ideal = ideal_weight::estimate(height_cm, gender)?;

    println!(
        "{}",
        format!(
            "Ideal weight for {} ({})",
            units::format_feet_inches(height_cm),
            gender
        )
        .bold()
    );
    render_ideal_weight(&ideal);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_calories(
    height: Decimal,
    height_unit: HeightUnit,
    weight: Decimal,
    weight_unit: WeightUnit,
    age: u16,
    gender: Gender,
    activity: ActivityLevel,
) -> Result<()> {
    let height_cm = HeightMeasurement::from_value(height, height_unit).to_cm()?;
    let weight_kg = WeightMeasurement::from_value(weight, weight_unit).to_kg()?;
    let inputs = MetricInputs::new(height_cm, weight_kg, age, Some(gender), Some(activity))?;
    let needs = calories::estimate(&inputs);
    render_calories(&needs);
    Ok(())
}

fn run_history(config: &AppConfig, clear: bool, limit: usize) -> Result<()> {
    let store = HistoryStore::open(&config.settings.data_dir)?;

    if clear {
        store.clear()?;
        println!("{}", "✓ History cleared".green());
        return Ok(());
    }

    let records = store.list()?;
    if records.is_empty() {
        println!("No BMI records saved yet");
        return Ok(());
    }

    let rows: Vec<HistoryRow> = records
        .iter()
        .take(limit)
        .map(|r| HistoryRow {
            bmi: r.bmi.to_string(),
            category: r.category.to_string(),
            date: r.date.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}

fn run_share(config: &AppConfig, copy: bool) -> Result<()> {
    let store = HistoryStore::open(&config.settings.data_dir)?;
    let records = store.list()?;
    let latest = records.first().ok_or_else(|| {
        anyhow::anyhow!("No BMI result to share. Run `bmirs calculate --save` first.")
    })?;

    let text = if copy {
        share::copy_summary(latest.bmi, latest.category)
    } else {
        share::share_message(latest.bmi, latest.category)
    };
    println!("{}", text);
    Ok(())
}

fn run_config(
    mut config: AppConfig,
    list: bool,
    set: Option<String>,
    get: Option<String>,
) -> Result<()> {
    if list {
        for (key, value) in config.list_values() {
            println!("{} = {}", key.bold(), value);
        }
    } else if let Some(key_value) = set {
        let (key, value) = key_value
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected key=value, got: {}", key_value))?;
        config.set_value(key.trim(), value.trim())?;
        config.save_default()?;
        println!("{}", format!("✓ {} updated", key.trim()).green());
    } else if let Some(key) = get {
        match config.get_value(&key) {
            Some(value) => println!("{}", value),
            None => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
        }
    }
    Ok(())
}

fn missing(field: &str) -> BmirsError {
    bmirs::error::ValidationError::MissingField {
        field: field.to_string(),
    }
    .into()
}

/// Pick the feet/inches pair when given, otherwise the single height value
fn resolve_height(
    height: Option<Decimal>,
    unit: HeightUnit,
    feet: Option<Decimal>,
    inches: Option<Decimal>,
) -> Result<HeightMeasurement> {
    if feet.is_some() || inches.is_some() {
        return Ok(HeightMeasurement::FeetInches {
            feet: feet.unwrap_or_default(),
            inches: inches.unwrap_or_default(),
        });
    }
    let value = height.ok_or_else(|| missing("height"))?;
    Ok(HeightMeasurement::from_value(value, unit))
}

fn category_color(category: BmiCategory, text: &str) -> ColoredString {
    match category {
        BmiCategory::Underweight => text.blue(),
        BmiCategory::NormalWeight => text.green(),
        BmiCategory::Overweight => text.yellow(),
        BmiCategory::Obese => text.red(),
    }
}

const PROGRESS_WIDTH: usize = 40;

fn render_progress(progress: Decimal) -> String {
    let filled = (progress * Decimal::from(PROGRESS_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(PROGRESS_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}

fn render_result(result: &BmiResult, inputs: &MetricInputs) {
    let score = units::round_display(result.bmi, 1).to_string();
    println!();
    println!(
        "  BMI: {}  {}",
        category_color(result.category, &score).bold(),
        category_color(result.category, &result.category.to_string())
    );
    println!(
        "  {} {}",
        render_progress(result.progress),
        format!(
            "({} cm, {} kg)",
            units::round_display(inputs.height_cm, 2).normalize(),
            units::round_display(inputs.weight_kg, 2).normalize()
        )
        .dimmed()
    );
    println!();
    println!("  {}", result.category.advisory());
    println!();
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "BMI")]
    bmi: String,
    #[tabled(rename = "Category")]
    category: String,
}

#[derive(Tabled)]
struct IdealWeightRow {
    #[tabled(rename = "Method")]
    method: &'static str,
    #[tabled(rename = "Ideal Weight")]
    value: String,
}

fn render_ideal_weight(ideal: &bmirs::models::IdealWeightEstimate) {
    let rows = vec![
        IdealWeightRow {
            method: "Healthy BMI Range",
            value: format!("{} - {} kg", ideal.bmi_range_kg.0, ideal.bmi_range_kg.1),
        },
        IdealWeightRow {
            method: "Robinson Formula",
            value: format!("{} kg", ideal.robinson_kg),
        },
        IdealWeightRow {
            method: "Devine Formula",
            value: format!("{} kg", ideal.devine_kg),
        },
        IdealWeightRow {
            method: "Miller Formula",
            value: format!("{} kg", ideal.miller_kg),
        },
        IdealWeightRow {
            method: "Hamwi Formula",
            value: format!("{} kg", ideal.hamwi_kg),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

#[derive(Tabled)]
struct CalorieRow {
    #[tabled(rename = "Target")]
    target: &'static str,
    #[tabled(rename = "kcal/day")]
    value: i32,
}

fn render_calories(needs: &bmirs::models::CalorieEstimate) {
    let rows = vec![
        CalorieRow {
            target: "BMR (Base)",
            value: needs.bmr,
        },
        CalorieRow {
            target: "Maintenance",
            value: needs.maintenance,
        },
        CalorieRow {
            target: "Weight Loss",
            value: needs.weight_loss,
        },
        CalorieRow {
            target: "Weight Gain",
            value: needs.weight_gain,
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
