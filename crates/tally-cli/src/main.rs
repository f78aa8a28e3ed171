//! Tally CLI - run any calculator from the command line, or an interactive
//! stopwatch session.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::too_many_lines,
    clippy::match_same_arms,
    clippy::single_match_else,
    clippy::items_after_statements
)]

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead, Write as _};
use std::sync::{Arc, Mutex};
use tally_core::{format_compact, format_verbose, RunState, Stopwatch, Ticker};
use tally_tools::dates::{add_days, date_diff, parse_date, AddDaysInput, DateDiffInput};
use tally_tools::finance::{currency, currency_codes, emi, CurrencyInput, EmiInput};
use tally_tools::health::{
    bac, bmi, bmr, macros, protein, sleep, ActivityLevel, BacInput, BmiInput, BmrInput,
    MacroGoal, MacroInput, ProteinInput, Sex, SleepInput, UnitSystem,
};
use tally_tools::text::{cleanup, counts, transform_case, CaseStyle};
use tally_tools::units::{
    convert_length, convert_mass, convert_temperature, LengthUnit, MassUnit, TempUnit,
};
use tally_tools::InputError;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Everyday calculators and a lap timer")]
#[command(version)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Metric,
    Imperial,
}

impl From<UnitArg> for UnitSystem {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Metric => Self::Metric,
            UnitArg::Imperial => Self::Imperial,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Self::Male,
            SexArg::Female => Self::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    Balanced,
    LowCarb,
    HighProtein,
}

impl From<GoalArg> for MacroGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::Balanced => Self::Balanced,
            GoalArg::LowCarb => Self::LowCarb,
            GoalArg::HighProtein => Self::HighProtein,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActivityArg {
    Sedentary,
    Moderate,
    Active,
    Athlete,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Sedentary => Self::Sedentary,
            ActivityArg::Moderate => Self::Moderate,
            ActivityArg::Active => Self::Active,
            ActivityArg::Athlete => Self::Athlete,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TextMode {
    Cleanup,
    Counts,
    Upper,
    Lower,
    Title,
}

#[derive(Subcommand)]
enum Commands {
    /// Body mass index and WHO band
    Bmi {
        /// Weight in kg (metric) or lb (imperial)
        #[arg(short, long)]
        weight: f64,
        /// Height in cm (metric) or inches (imperial)
        #[arg(short = 'H', long)]
        height: f64,
        #[arg(short, long, value_enum, default_value = "metric")]
        unit: UnitArg,
    },

    /// Resting calories per day (Mifflin-St Jeor)
    Bmr {
        #[arg(short, long, value_enum)]
        sex: SexArg,
        #[arg(short, long)]
        age: u32,
        #[arg(short, long)]
        weight: f64,
        #[arg(short = 'H', long)]
        height: f64,
        #[arg(short, long, value_enum, default_value = "metric")]
        unit: UnitArg,
    },

    /// Blood alcohol estimate (Widmark)
    Bac {
        #[arg(short, long, value_enum)]
        sex: SexArg,
        #[arg(short, long)]
        weight: f64,
        #[arg(short, long, value_enum, default_value = "metric")]
        unit: UnitArg,
        /// Standard drinks (14 g of ethanol each)
        #[arg(short, long)]
        drinks: f64,
        /// Hours since the first drink
        #[arg(long, default_value = "0")]
        hours: f64,
    },

    /// Split a calorie target into macro grams
    Macros {
        #[arg(short, long)]
        calories: f64,
        #[arg(short, long, value_enum, default_value = "balanced")]
        goal: GoalArg,
    },

    /// Daily protein band from body weight
    Protein {
        #[arg(short, long)]
        weight: f64,
        #[arg(short, long, value_enum, default_value = "metric")]
        unit: UnitArg,
        #[arg(short, long, value_enum, default_value = "sedentary")]
        activity: ActivityArg,
    },

    /// Bedtimes for a wake-up time
    Sleep {
        /// Wake-up time, HH:MM
        #[arg(short, long)]
        wake: String,
    },

    /// Loan monthly installment and total interest
    Emi {
        #[arg(short, long)]
        principal: f64,
        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,
        #[arg(short, long)]
        months: u32,
    },

    /// Convert between currencies (fixed table)
    Currency {
        #[arg(short, long)]
        amount: f64,
        #[arg(short, long)]
        from: String,
        #[arg(short, long)]
        to: String,
    },

    /// Calendar gap between two dates
    DateDiff {
        /// Start date, YYYY-MM-DD
        start: String,
        /// End date, YYYY-MM-DD
        end: String,
    },

    /// Offset a date by a signed day count
    AddDays {
        /// Base date, YYYY-MM-DD
        date: String,
        /// Days to add; negative moves backwards
        #[arg(allow_hyphen_values = true)]
        days: i64,
    },

    /// Text cleanup, counts, and case transforms
    Text {
        #[arg(short, long, value_enum)]
        mode: TextMode,
        /// Input text; reads stdin when omitted
        input: Option<String>,
    },

    /// Convert length, mass, or temperature units
    Convert {
        value: f64,
        /// Source unit (mm cm m km in ft yd mi | g kg t oz lb st | c f k)
        from: String,
        /// Target unit in the same dimension
        to: String,
    },

    /// List every tool and its input fields
    Tools,

    /// Interactive stopwatch session
    Watch,
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Commands::Bmi {
            weight,
            height,
            unit,
        } => {
            let result = unwrap_input(bmi(&BmiInput {
                weight,
                height,
                unit: unit.into(),
            }));
            emit(json, &result, || {
                println!("BMI: {:.1} ({:?})", result.bmi, result.category);
            });
        }
        Commands::Bmr {
            sex,
            age,
            weight,
            height,
            unit,
        } => {
            let result = unwrap_input(bmr(&BmrInput {
                sex: sex.into(),
                age_years: age,
                weight,
                height,
                unit: unit.into(),
            }));
            emit(json, &result, || {
                println!("BMR: {:.0} kcal/day", result.bmr_kcal);
            });
        }
        Commands::Bac {
            sex,
            weight,
            unit,
            drinks,
            hours,
        } => {
            let result = unwrap_input(bac(&BacInput {
                sex: sex.into(),
                weight,
                unit: unit.into(),
                standard_drinks: drinks,
                hours_since_first: hours,
            }));
            emit(json, &result, || {
                println!("BAC: {:.3}% ({:?})", result.bac_percent, result.band);
            });
        }
        Commands::Macros { calories, goal } => {
            let result = unwrap_input(macros(&MacroInput {
                calories,
                goal: goal.into(),
            }));
            emit(json, &result, || {
                println!(
                    "Protein {:.0} g / Carbs {:.0} g / Fat {:.0} g",
                    result.protein_g, result.carbs_g, result.fat_g
                );
            });
        }
        Commands::Protein {
            weight,
            unit,
            activity,
        } => {
            let result = unwrap_input(protein(&ProteinInput {
                weight,
                unit: unit.into(),
                activity: activity.into(),
            }));
            emit(json, &result, || {
                println!(
                    "Protein: {:.0}-{:.0} g/day",
                    result.grams_low, result.grams_high
                );
            });
        }
        Commands::Sleep { wake } => {
            let wake_time = unwrap_input(parse_wake_time(&wake));
            let result = unwrap_input(sleep(&SleepInput { wake_time }));
            emit(json, &result, || {
                for bedtime in &result.bedtimes {
                    println!(
                        "{} cycles ({}): go to bed at {}",
                        bedtime.cycles,
                        format_verbose(u64::from(bedtime.cycles) * 90 * 60_000),
                        bedtime.bedtime.format("%H:%M")
                    );
                }
            });
        }
        Commands::Emi {
            principal,
            rate,
            months,
        } => {
            let result = unwrap_input(emi(&EmiInput {
                principal,
                annual_rate_percent: rate,
                months,
            }));
            emit(json, &result, || {
                println!("Monthly payment: {:.2}", result.monthly_payment);
                println!("Total payment:   {:.2}", result.total_payment);
                println!("Total interest:  {:.2}", result.total_interest);
            });
        }
        Commands::Currency { amount, from, to } => {
            let result = unwrap_input(currency(&CurrencyInput {
                amount,
                from: from.clone(),
                to: to.clone(),
            }));
            emit(json, &result, || {
                println!(
                    "{:.2} {} = {:.2} {} (rate {:.4})",
                    amount,
                    from.to_uppercase(),
                    result.converted,
                    to.to_uppercase(),
                    result.rate
                );
                println!("Known codes: {}", currency_codes().join(", "));
            });
        }
        Commands::DateDiff { start, end } => {
            let start = unwrap_input(parse_date("start", &start));
            let end = unwrap_input(parse_date("end", &end));
            let result = unwrap_input(date_diff(&DateDiffInput { start, end }));
            emit(json, &result, || {
                println!(
                    "{} years, {} months, {} days ({} days total)",
                    result.years, result.months, result.days, result.total_days
                );
            });
        }
        Commands::AddDays { date, days } => {
            let date = unwrap_input(parse_date("date", &date));
            let result = unwrap_input(add_days(&AddDaysInput { date, days }));
            emit(json, &result, || {
                println!("{result}");
            });
        }
        Commands::Text { mode, input } => {
            let input = input.unwrap_or_else(read_stdin);
            match mode {
                TextMode::Cleanup => println!("{}", cleanup(&input)),
                TextMode::Counts => {
                    let result = counts(&input);
                    emit(json, &result, || {
                        println!(
                            "{} chars, {} words, {} sentences, {} lines",
                            result.chars, result.words, result.sentences, result.lines
                        );
                    });
                }
                TextMode::Upper => println!("{}", transform_case(&input, CaseStyle::Upper)),
                TextMode::Lower => println!("{}", transform_case(&input, CaseStyle::Lower)),
                TextMode::Title => println!("{}", transform_case(&input, CaseStyle::Title)),
            }
        }
        Commands::Convert { value, from, to } => {
            let result = unwrap_input(run_convert(value, &from, &to));
            emit(json, &result, || {
                println!("{value} {from} = {result} {to}");
            });
        }
        Commands::Tools => {
            let tools = tally_tools::catalog();
            if json {
                print_json(&tools);
            } else {
                for tool in &tools {
                    println!("{:<12} {} - {}", tool.id, tool.title, tool.summary);
                    for field in &tool.fields {
                        let req = if field.required { "" } else { " (optional)" };
                        println!("    {}: {:?}{req}", field.name, field.kind);
                    }
                }
            }
        }
        Commands::Watch => run_watch(),
    }
}

/// Print a result as JSON or through the human-readable fallback.
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) {
    if json {
        print_json(value);
    } else {
        human();
    }
}

fn print_json<T: Serialize>(value: &T) {
    let rendered = serde_json::to_string_pretty(value).expect("results serialize cleanly");
    println!("{rendered}");
}

/// Unwrap a tool result, or report the rejected field and exit.
fn unwrap_input<T>(result: Result<T, InputError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            eprintln!("invalid input - {err}");
            std::process::exit(1);
        }
    }
}

fn parse_wake_time(value: &str) -> Result<chrono::NaiveTime, InputError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| InputError::new("wake", format!("'{value}' is not an HH:MM time")))
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    for line in io::stdin().lock().lines() {
        match line {
            Ok(text) => {
                buffer.push_str(&text);
                buffer.push('\n');
            }
            Err(_) => break,
        }
    }
    buffer
}

/// A unit name in any of the three convertible dimensions.
enum AnyUnit {
    Length(LengthUnit),
    Mass(MassUnit),
    Temp(TempUnit),
}

fn parse_unit(field: &str, name: &str) -> Result<AnyUnit, InputError> {
    let unit = match name.to_ascii_lowercase().as_str() {
        "mm" => AnyUnit::Length(LengthUnit::Millimeter),
        "cm" => AnyUnit::Length(LengthUnit::Centimeter),
        "m" => AnyUnit::Length(LengthUnit::Meter),
        "km" => AnyUnit::Length(LengthUnit::Kilometer),
        "in" => AnyUnit::Length(LengthUnit::Inch),
        "ft" => AnyUnit::Length(LengthUnit::Foot),
        "yd" => AnyUnit::Length(LengthUnit::Yard),
        "mi" => AnyUnit::Length(LengthUnit::Mile),
        "g" => AnyUnit::Mass(MassUnit::Gram),
        "kg" => AnyUnit::Mass(MassUnit::Kilogram),
        "t" => AnyUnit::Mass(MassUnit::Tonne),
        "oz" => AnyUnit::Mass(MassUnit::Ounce),
        "lb" => AnyUnit::Mass(MassUnit::Pound),
        "st" => AnyUnit::Mass(MassUnit::Stone),
        "c" | "celsius" => AnyUnit::Temp(TempUnit::Celsius),
        "f" | "fahrenheit" => AnyUnit::Temp(TempUnit::Fahrenheit),
        "k" | "kelvin" => AnyUnit::Temp(TempUnit::Kelvin),
        _ => return Err(InputError::new(field, format!("unknown unit '{name}'"))),
    };
    Ok(unit)
}

fn run_convert(value: f64, from: &str, to: &str) -> Result<f64, InputError> {
    match (parse_unit("from", from)?, parse_unit("to", to)?) {
        (AnyUnit::Length(a), AnyUnit::Length(b)) => convert_length(value, a, b),
        (AnyUnit::Mass(a), AnyUnit::Mass(b)) => convert_mass(value, a, b),
        (AnyUnit::Temp(a), AnyUnit::Temp(b)) => convert_temperature(value, a, b),
        _ => Err(InputError::new(
            "to",
            format!("'{from}' and '{to}' measure different things"),
        )),
    }
}

// ============================================================================
// Interactive stopwatch
// ============================================================================

const WATCH_HELP: &str = "\
commands: s start/resume | p pause | l lap | r reset | t lap table | q quit";

fn run_watch() {
    println!("tally stopwatch - {WATCH_HELP}");
    let watch = Arc::new(Mutex::new(Stopwatch::new()));
    // Held only while running; dropping it cancels the repaint thread.
    let mut ticker: Option<Ticker> = None;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match line.trim() {
            "s" | "start" => {
                let started = lock(&watch).start();
                if started && ticker.is_none() {
                    ticker = Some(spawn_repaint(Arc::clone(&watch)));
                }
            }
            "p" | "pause" => {
                let paused = lock(&watch).pause();
                ticker = None; // drop cancels the repaint tick
                if paused {
                    let guard = lock(&watch);
                    println!(
                        "\rpaused at {} ({})",
                        format_compact(guard.elapsed_ms()),
                        format_verbose(guard.elapsed_ms())
                    );
                }
            }
            "l" | "lap" => {
                let recorded = lock(&watch).lap();
                if recorded {
                    let guard = lock(&watch);
                    if let Some(lap) = guard.laps().last() {
                        println!(
                            "\rlap {:>3}  {}  (total {})",
                            lap.index,
                            format_compact(lap.duration_ms),
                            format_compact(lap.cumulative_ms)
                        );
                    }
                } else {
                    println!("\rlap ignored (stopwatch not running)");
                }
            }
            "r" | "reset" => {
                ticker = None;
                lock(&watch).reset();
                println!("\rreset");
            }
            "t" | "table" => {
                print_lap_table(&lock(&watch));
            }
            "q" | "quit" => break,
            "" => {}
            _ => println!("{WATCH_HELP}"),
        }
    }

    drop(ticker); // stop the repaint before the summary
    let guard = lock(&watch);
    if guard.elapsed_ms() > 0 {
        println!("\rfinal: {}", format_verbose(guard.elapsed_ms()));
        print_lap_table(&guard);
    }
}

fn lock(watch: &Arc<Mutex<Stopwatch>>) -> std::sync::MutexGuard<'_, Stopwatch> {
    watch.lock().expect("stopwatch mutex poisoned")
}

fn spawn_repaint(watch: Arc<Mutex<Stopwatch>>) -> Ticker {
    Ticker::spawn_default(move || {
        if let Ok(guard) = watch.lock() {
            if guard.run_state() == RunState::Running {
                print!("\r  {}  ", format_compact(guard.elapsed_ms()));
                let _ = io::stdout().flush();
            }
        }
    })
}

fn print_lap_table(watch: &Stopwatch) {
    let laps = watch.laps();
    let Some(stats) = watch.stats() else {
        println!("\rno laps recorded");
        return;
    };
    for (i, lap) in laps.iter().enumerate() {
        let mut flags = String::new();
        if stats.is_fastest(i) {
            flags.push_str(" fastest");
        }
        if stats.is_slowest(i) {
            flags.push_str(" slowest");
        }
        println!(
            "\rlap {:>3}  {}  (total {}){flags}",
            lap.index,
            format_compact(lap.duration_ms),
            format_compact(lap.cumulative_ms)
        );
    }
    println!(
        "\rfastest {}  slowest {}  average {}",
        format_compact(stats.fastest_ms),
        format_compact(stats.slowest_ms),
        format_compact(stats.average_ms.round() as u64)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_dimensions() {
        assert!(matches!(
            parse_unit("from", "km"),
            Ok(AnyUnit::Length(LengthUnit::Kilometer))
        ));
        assert!(matches!(
            parse_unit("from", "LB"),
            Ok(AnyUnit::Mass(MassUnit::Pound))
        ));
        assert!(matches!(
            parse_unit("from", "kelvin"),
            Ok(AnyUnit::Temp(TempUnit::Kelvin))
        ));
        assert!(parse_unit("from", "furlong").is_err());
    }

    #[test]
    fn test_convert_rejects_mixed_dimensions() {
        let err = run_convert(1.0, "kg", "km").unwrap_err();
        assert_eq!(err.field, "to");
    }

    #[test]
    fn test_parse_wake_time() {
        assert!(parse_wake_time("07:30").is_ok());
        assert!(parse_wake_time("7:30").is_ok());
        assert!(parse_wake_time("25:00").is_err());
        assert_eq!(parse_wake_time("bedtime").unwrap_err().field, "wake");
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
