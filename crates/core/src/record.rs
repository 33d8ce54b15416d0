use serde::{Deserialize, Serialize};

use super::weight::Weight;

/// Why a recovered row needed recovery. The marker text is what lands in the
/// lot column so the row stays visible for human review downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryKind {
    /// Code128 payload contained a space; the scanner mangled the read.
    ReadError,
    /// Code128 asterisk layout was missing tokens or carried a bad weight.
    Code128Asterisk,
    /// QR payload looked like embedded JSON but would not parse.
    QrJson,
    /// QR comma-decimal payload failed both the new and the legacy layout.
    QrCommaFormat,
}

impl RecoveryKind {
    pub fn marker(self) -> &'static str {
        match self {
            RecoveryKind::ReadError => "erro de leitura",
            RecoveryKind::Code128Asterisk => "erro Code128/*",
            RecoveryKind::QrJson => "erro QR/JSON",
            RecoveryKind::QrCommaFormat => "erro QR/FormatoVirgula",
        }
    }
}

/// Outcome of field extraction for one row. `Recovered` rows are still
/// emitted, with the marker in `lot` and no weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Ok,
    Recovered(RecoveryKind),
}

impl ExtractionStatus {
    pub fn is_recovered(self) -> bool {
        matches!(self, ExtractionStatus::Recovered(_))
    }
}

/// One normalized inventory movement, as written to the consolidated sheet.
///
/// Assembled once per accepted scan row and immutable afterwards. Unset
/// fields stay `None`; they are never coerced to empty strings or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRecord {
    /// `dd/mm/yyyy` when the raw date normalized, else the original string.
    pub read_date: String,
    pub read_time: String,
    pub branch: Option<String>,
    pub product_code: Option<String>,
    pub warehouse: Option<String>,
    /// Lot identifier, or a recovery marker when extraction was recovered.
    pub lot: String,
    /// `None` means "not determined", which is distinct from zero.
    pub weight: Option<Weight>,
    /// Base name of the originating export file.
    pub source_label: String,
    pub status: ExtractionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_distinct_per_failure_site() {
        let kinds = [
            RecoveryKind::ReadError,
            RecoveryKind::Code128Asterisk,
            RecoveryKind::QrJson,
            RecoveryKind::QrCommaFormat,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.marker(), b.marker());
            }
        }
    }

    #[test]
    fn recovered_status_is_queryable_without_string_matching() {
        assert!(!ExtractionStatus::Ok.is_recovered());
        assert!(ExtractionStatus::Recovered(RecoveryKind::QrJson).is_recovered());
    }

    #[test]
    fn marker_text_matches_legacy_labels() {
        assert_eq!(RecoveryKind::ReadError.marker(), "erro de leitura");
        assert_eq!(RecoveryKind::Code128Asterisk.marker(), "erro Code128/*");
        assert_eq!(RecoveryKind::QrJson.marker(), "erro QR/JSON");
        assert_eq!(RecoveryKind::QrCommaFormat.marker(), "erro QR/FormatoVirgula");
    }
}
