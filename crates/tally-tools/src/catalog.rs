//! Machine-readable catalog of the tool suite.
//!
//! Each entry names a tool plus the fixed set of named, typed fields its
//! compute function accepts, so a host can render a form per tool without
//! any shared schema across tools.

use serde::{Deserialize, Serialize};

/// Field value kind, as a host input widget would see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Floating-point number.
    Number,
    /// Whole number.
    Integer,
    /// Free text.
    Text,
    /// `YYYY-MM-DD` date.
    Date,
    /// `HH:MM` time of day.
    Time,
    /// One of a fixed set of options.
    Choice(Vec<String>),
}

/// One named, typed input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    /// Required field of the given kind.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
        }
    }

    /// Required number field.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Required choice field.
    pub fn choice(name: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            FieldKind::Choice(options.iter().map(|o| (*o).to_string()).collect()),
        )
    }

    /// Mark the field optional (a default applies when absent).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// One tool in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Stable identifier, usable as a route or subcommand name.
    pub id: String,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub summary: String,
    /// Input form definition, in display order.
    pub fields: Vec<FieldSpec>,
}

impl ToolSpec {
    /// Create a tool entry.
    pub fn new(id: &str, title: &str, summary: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            fields: Vec::new(),
        }
    }

    /// Append an input field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

const UNIT_OPTIONS: &[&str] = &["metric", "imperial"];
const SEX_OPTIONS: &[&str] = &["male", "female"];

/// The full tool catalog, in display order.
#[must_use]
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("bmi", "BMI Calculator", "Body mass index and WHO band")
            .field(FieldSpec::number("weight"))
            .field(FieldSpec::number("height"))
            .field(FieldSpec::choice("unit", UNIT_OPTIONS).optional()),
        ToolSpec::new("bmr", "BMR Calculator", "Resting calories (Mifflin-St Jeor)")
            .field(FieldSpec::choice("sex", SEX_OPTIONS))
            .field(FieldSpec::new("age_years", FieldKind::Integer))
            .field(FieldSpec::number("weight"))
            .field(FieldSpec::number("height"))
            .field(FieldSpec::choice("unit", UNIT_OPTIONS).optional()),
        ToolSpec::new("bac", "BAC Estimator", "Blood alcohol estimate (Widmark)")
            .field(FieldSpec::choice("sex", SEX_OPTIONS))
            .field(FieldSpec::number("weight"))
            .field(FieldSpec::choice("unit", UNIT_OPTIONS).optional())
            .field(FieldSpec::number("standard_drinks"))
            .field(FieldSpec::number("hours_since_first")),
        ToolSpec::new("macros", "Macro Split", "Calorie target into macro grams")
            .field(FieldSpec::number("calories"))
            .field(
                FieldSpec::choice("goal", &["balanced", "low_carb", "high_protein"]).optional(),
            ),
        ToolSpec::new("protein", "Protein Intake", "Daily protein band from weight")
            .field(FieldSpec::number("weight"))
            .field(FieldSpec::choice("unit", UNIT_OPTIONS).optional())
            .field(
                FieldSpec::choice(
                    "activity",
                    &["sedentary", "moderate", "active", "athlete"],
                )
                .optional(),
            ),
        ToolSpec::new("sleep", "Sleep Cycles", "Bedtimes for a wake-up time")
            .field(FieldSpec::new("wake_time", FieldKind::Time)),
        ToolSpec::new("emi", "Loan EMI", "Monthly installment and total interest")
            .field(FieldSpec::number("principal"))
            .field(FieldSpec::number("annual_rate_percent"))
            .field(FieldSpec::new("months", FieldKind::Integer)),
        ToolSpec::new("currency", "Currency Converter", "Fixed-rate table lookup")
            .field(FieldSpec::number("amount"))
            .field(FieldSpec::new("from", FieldKind::Text))
            .field(FieldSpec::new("to", FieldKind::Text)),
        ToolSpec::new("date-diff", "Date Difference", "Calendar gap between two dates")
            .field(FieldSpec::new("start", FieldKind::Date))
            .field(FieldSpec::new("end", FieldKind::Date)),
        ToolSpec::new("add-days", "Date Offset", "Date plus or minus a day count")
            .field(FieldSpec::new("date", FieldKind::Date))
            .field(FieldSpec::new("days", FieldKind::Integer)),
        ToolSpec::new("text", "Text Utilities", "Cleanup, counts, case transforms")
            .field(FieldSpec::new("input", FieldKind::Text)),
        ToolSpec::new("convert", "Unit Converter", "Length, mass, temperature")
            .field(FieldSpec::number("value"))
            .field(FieldSpec::new("from", FieldKind::Text))
            .field(FieldSpec::new("to", FieldKind::Text)),
        ToolSpec::new("stopwatch", "Stopwatch", "Lap timer with statistics"),
    ]
}
