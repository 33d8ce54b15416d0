use csv::StringRecord;

/// Named view over one raw scanner-export row, validated once at the filter
/// stage. Field positions follow the export layout: 0 read date, 1 read
/// time, 3 symbology hint, 4 payload. Field 2 is scanner noise and unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub read_date: String,
    pub read_time: String,
    pub symbology: String,
    pub payload: String,
}

impl RawRow {
    /// Build a row from a delimited record, applying the acceptance filter.
    ///
    /// `None` means the row is skipped silently: too few fields, a repeated
    /// header line (field 0 contains "date"), or a field 0 that does not
    /// start with a digit.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() < 5 {
            return None;
        }
        let read_date = record.get(0)?.trim().to_string();
        if !accepts_date_field(&read_date) {
            return None;
        }
        Some(RawRow {
            read_date,
            read_time: record.get(1)?.trim().to_string(),
            symbology: record.get(3)?.trim().to_string(),
            payload: record.get(4)?.trim().to_string(),
        })
    }
}

/// Header artifacts and unreadable junk never make it past this predicate.
fn accepts_date_field(field: &str) -> bool {
    if field.to_lowercase().contains("date") {
        return false;
    }
    field.chars().next().is_some_and(|c| c.is_ascii_digit())
}
