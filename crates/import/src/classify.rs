/// Payload dialects, in classification precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// "BRANCH-CODE - WAREHOUSE-LOT-WEIGHT" finished-good labels.
    FinishedGood,
    /// Coil labels scanned as Code128: asterisk-delimited or bare digits.
    CoilCode128,
    /// Coil labels scanned as QR/DataMatrix: JSON, comma-decimal, or hyphens.
    CoilQr,
    /// Nothing matched; the payload is carried verbatim as the lot.
    Unknown,
}

/// Symbology hints the QR-family labels are scanned under. `CODE_128` (with
/// the underscore) is reported by a different scanner firmware than
/// `Code128` and carries QR-shaped payloads.
const QR_SYMBOLOGIES: [&str; 4] = ["QR_CODE", "QR", "CODE_39", "CODE_128"];

/// Pick the payload dialect from the payload shape and the scanner's
/// symbology hint. First match wins.
pub fn classify(payload: &str, symbology: &str) -> Dialect {
    if payload.contains(" -") {
        Dialect::FinishedGood
    } else if symbology == "Code128" || payload.contains('*') {
        Dialect::CoilCode128
    } else if QR_SYMBOLOGIES.contains(&symbology) || payload.contains('{') || payload.contains(',')
    {
        Dialect::CoilQr
    } else {
        Dialect::Unknown
    }
}
