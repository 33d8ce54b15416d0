use chrono::NaiveDate;

/// Reformat the scanner's `MM-DD-YYYY` read date as `DD/MM/YYYY`.
///
/// Anything that does not parse, including an already-normalized
/// `dd/mm/yyyy` value, passes through unchanged. Never fails.
pub fn normalize_read_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%m-%d-%Y") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
