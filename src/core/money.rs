//! Amounts are carried as `i64` minor units (e.g. cents) everywhere in the
//! ledger. Split-sum and balance checks are exact integer comparisons;
//! nothing in the core touches floating point.

/// Formats a minor-unit amount as a two-decimal string, e.g. `4050` -> "40.50".
pub fn format_minor(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Converts minor units to major units for display surfaces (charts).
/// Not for ledger arithmetic.
pub fn to_major(amount_minor: i64) -> f64 {
    amount_minor as f64 / 100.0
}
