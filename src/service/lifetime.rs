//! Mission lifetime derivation.

use chrono::NaiveDate;

/// Date layout used by the launch dataset, e.g. `"24-Sep-14"`.
const LAUNCH_DATE_FORMAT: &str = "%d-%b-%y";

/// Elapsed years between a raw launch-date string and `today`, rounded
/// to two decimals.
///
/// Years are counted as days divided by 365, matching how the launch
/// details view has always reported lifetimes. Returns `None` when the
/// date does not parse; the caller renders that as a null field rather
/// than failing the row.
pub fn mission_lifetime(launch_date: &str, today: NaiveDate) -> Option<f64> {
    let launched = NaiveDate::parse_from_str(launch_date.trim(), LAUNCH_DATE_FORMAT).ok()?;
    let days = (today - launched).num_days();
    Some(round2(days as f64 / 365.0))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
