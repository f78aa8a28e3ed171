//! Finance calculators: loan EMI and a toy currency converter.

use crate::error::{require_non_negative, require_positive, InputError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Loan EMI
// ============================================================================

/// Inputs for the equated-monthly-installment calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiInput {
    /// Loan principal.
    pub principal: f64,
    /// Annual interest rate in percent (e.g. `7.5`). Zero is allowed.
    pub annual_rate_percent: f64,
    /// Tenure in months, at least 1.
    pub months: u32,
}

/// EMI result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    /// Fixed monthly payment.
    pub monthly_payment: f64,
    /// Payment × months.
    pub total_payment: f64,
    /// Total payment minus principal.
    pub total_interest: f64,
}

/// Compute the fixed monthly installment:
/// `P·r·(1+r)ⁿ / ((1+r)ⁿ − 1)` with `r` the monthly rate. A zero rate
/// degenerates to straight division of the principal.
pub fn emi(input: &EmiInput) -> Result<EmiResult, InputError> {
    let principal = require_positive("principal", input.principal)?;
    let rate = require_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    if input.months == 0 {
        return Err(InputError::new("months", "must be at least 1"));
    }

    let n = f64::from(input.months);
    let monthly_rate = rate / 12.0 / 100.0;
    let monthly_payment = if monthly_rate == 0.0 {
        principal / n
    } else {
        let growth = (1.0 + monthly_rate).powf(n);
        principal * monthly_rate * growth / (growth - 1.0)
    };
    let total_payment = monthly_payment * n;
    Ok(EmiResult {
        monthly_payment,
        total_payment,
        total_interest: total_payment - principal,
    })
}

// ============================================================================
// Currency conversion (static table)
// ============================================================================

/// Fixed USD-pivot rate table: units of each currency per one USD.
///
/// Deliberately a toy lookup, matching the client-side original; rates are
/// indicative, not live.
const RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 149.50),
    ("INR", 83.10),
    ("AUD", 1.52),
    ("CAD", 1.36),
    ("CHF", 0.88),
    ("CNY", 7.24),
    ("BRL", 4.95),
];

/// Currency codes the converter understands.
#[must_use]
pub fn currency_codes() -> Vec<&'static str> {
    RATES.iter().map(|(code, _)| *code).collect()
}

fn rate_for(field: &str, code: &str) -> Result<f64, InputError> {
    let upper = code.to_ascii_uppercase();
    RATES
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, r)| *r)
        .ok_or_else(|| InputError::new(field, format!("unknown currency code '{code}'")))
}

/// Inputs for the currency converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInput {
    /// Amount in the source currency.
    pub amount: f64,
    /// Source currency code, case-insensitive.
    pub from: String,
    /// Target currency code, case-insensitive.
    pub to: String,
}

/// Currency conversion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyResult {
    /// Amount in the target currency.
    pub converted: f64,
    /// Target units per one source unit.
    pub rate: f64,
}

/// Convert an amount through the USD pivot.
pub fn currency(input: &CurrencyInput) -> Result<CurrencyResult, InputError> {
    let amount = require_non_negative("amount", input.amount)?;
    let from_rate = rate_for("from", &input.from)?;
    let to_rate = rate_for("to", &input.to)?;
    let rate = to_rate / from_rate;
    Ok(CurrencyResult {
        converted: amount * rate,
        rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    mod emi_tests {
        use super::*;

        #[test]
        fn test_standard_loan() {
            // 1_000_000 at 8% over 120 months ≈ 12_132.76 / month.
            let result = emi(&EmiInput {
                principal: 1_000_000.0,
                annual_rate_percent: 8.0,
                months: 120,
            })
            .expect("valid input");
            assert!(close(result.monthly_payment, 12_132.76, 0.05));
            assert!(close(
                result.total_payment,
                result.monthly_payment * 120.0,
                1e-6
            ));
            assert!(close(
                result.total_interest,
                result.total_payment - 1_000_000.0,
                1e-6
            ));
        }

        #[test]
        fn test_zero_rate_is_straight_division() {
            let result = emi(&EmiInput {
                principal: 1200.0,
                annual_rate_percent: 0.0,
                months: 12,
            })
            .expect("valid input");
            assert!(close(result.monthly_payment, 100.0, 1e-9));
            assert!(close(result.total_interest, 0.0, 1e-9));
        }

        #[test]
        fn test_single_month() {
            let result = emi(&EmiInput {
                principal: 1000.0,
                annual_rate_percent: 12.0,
                months: 1,
            })
            .expect("valid input");
            // One month at 1% monthly: pay back 1010.
            assert!(close(result.monthly_payment, 1010.0, 1e-6));
        }

        #[test]
        fn test_rejects_bad_inputs() {
            assert_eq!(
                emi(&EmiInput {
                    principal: 0.0,
                    annual_rate_percent: 5.0,
                    months: 12
                })
                .unwrap_err()
                .field,
                "principal"
            );
            assert_eq!(
                emi(&EmiInput {
                    principal: 1000.0,
                    annual_rate_percent: 5.0,
                    months: 0
                })
                .unwrap_err()
                .field,
                "months"
            );
        }
    }

    mod currency_tests {
        use super::*;

        #[test]
        fn test_identity() {
            let result = currency(&CurrencyInput {
                amount: 250.0,
                from: "USD".to_string(),
                to: "USD".to_string(),
            })
            .expect("valid input");
            assert!(close(result.converted, 250.0, 1e-9));
            assert!(close(result.rate, 1.0, 1e-9));
        }

        #[test]
        fn test_usd_to_eur() {
            let result = currency(&CurrencyInput {
                amount: 100.0,
                from: "USD".to_string(),
                to: "EUR".to_string(),
            })
            .expect("valid input");
            assert!(close(result.converted, 92.0, 1e-9));
        }

        #[test]
        fn test_cross_rate_through_pivot() {
            // EUR → GBP never touches USD amounts directly.
            let result = currency(&CurrencyInput {
                amount: 92.0,
                from: "EUR".to_string(),
                to: "GBP".to_string(),
            })
            .expect("valid input");
            assert!(close(result.converted, 79.0, 1e-9));
        }

        #[test]
        fn test_case_insensitive_codes() {
            let result = currency(&CurrencyInput {
                amount: 1.0,
                from: "usd".to_string(),
                to: "jpy".to_string(),
            })
            .expect("valid input");
            assert!(close(result.converted, 149.50, 1e-9));
        }

        #[test]
        fn test_unknown_code() {
            let err = currency(&CurrencyInput {
                amount: 1.0,
                from: "USD".to_string(),
                to: "XYZ".to_string(),
            })
            .unwrap_err();
            assert_eq!(err.field, "to");
            assert!(err.message.contains("XYZ"));
        }

        #[test]
        fn test_codes_list_contains_pivot() {
            assert!(currency_codes().contains(&"USD"));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// EMI with interest always costs at least the zero-rate payment.
            #[test]
            fn prop_interest_never_cheaper(
                principal in 1.0f64..10_000_000.0,
                rate in 0.0f64..40.0,
                months in 1u32..480
            ) {
                let result = emi(&EmiInput {
                    principal,
                    annual_rate_percent: rate,
                    months,
                })
                .expect("valid");
                prop_assert!(
                    result.monthly_payment >= principal / f64::from(months) - 1e-9
                );
                prop_assert!(result.total_interest >= -1e-6);
            }

            /// Converting there and back returns the original amount.
            #[test]
            fn prop_currency_round_trip(amount in 0.0f64..1_000_000.0) {
                let there = currency(&CurrencyInput {
                    amount,
                    from: "USD".to_string(),
                    to: "INR".to_string(),
                })
                .expect("valid");
                let back = currency(&CurrencyInput {
                    amount: there.converted,
                    from: "INR".to_string(),
                    to: "USD".to_string(),
                })
                .expect("valid");
                prop_assert!((back.converted - amount).abs() < 1e-6 * (1.0 + amount));
            }
        }
    }
}
