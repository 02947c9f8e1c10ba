use chrono::NaiveDate;

/// Key-value entries holding the week's first and last day (ISO dates).
pub const START_DATE_KEY: &str = "campo-data-1";
pub const END_DATE_KEY: &str = "campo-data-2";

/// `2027-03-01` → `01/03/2027`. Blank input yields `fallback`; anything that
/// is not an ISO date is passed through as typed.
pub fn format_br_date(iso: &str, fallback: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return fallback.to_string();
    }
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(e) => {
            tracing::warn!(input = iso, error = %e, "date is not in YYYY-MM-DD form, keeping it verbatim");
            iso.to_string()
        }
    }
}

/// Checks user input before it is stored under a date key.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
