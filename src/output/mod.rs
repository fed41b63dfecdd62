// Output: terminal summary and delimited-file export.

pub mod export;
pub mod terminal;

/// Format a ratio with a fixed number of decimal places.
///
/// Shared by the console summary and the exporter so both show the same
/// rounding for the same value.
pub fn fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}
