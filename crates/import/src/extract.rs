use inventario_core::{ExtractionStatus, RecoveryKind, Weight};

use crate::classify::Dialect;

/// The complete field set one extractor produced for one row.
///
/// Every path returns a fully-formed value; the assembler merges it into the
/// output record without further mutation, so no partial state survives
/// between attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub branch: Option<String>,
    pub product_code: Option<String>,
    pub warehouse: Option<String>,
    pub lot: String,
    pub weight: Option<Weight>,
    pub status: ExtractionStatus,
}

impl Extraction {
    fn lot_only(lot: impl Into<String>, weight: Option<Weight>) -> Self {
        Extraction {
            branch: None,
            product_code: None,
            warehouse: None,
            lot: lot.into(),
            weight,
            status: ExtractionStatus::Ok,
        }
    }

    fn recovered(kind: RecoveryKind) -> Self {
        Extraction {
            branch: None,
            product_code: None,
            warehouse: None,
            lot: kind.marker().to_string(),
            weight: None,
            status: ExtractionStatus::Recovered(kind),
        }
    }
}

/// Run the extractor matching the classified dialect over the payload.
pub fn extract(dialect: Dialect, payload: &str) -> Extraction {
    match dialect {
        Dialect::FinishedGood => finished_good(payload),
        Dialect::CoilCode128 => coil_code128(payload),
        Dialect::CoilQr => coil_qr(payload),
        Dialect::Unknown => Extraction::lot_only(payload, None),
    }
}

// ── Finished good ─────────────────────────────────────────────────────────────

/// "BRANCH-CODE - WAREHOUSE-LOT-WEIGHT": split once on " -", then by hyphen
/// on each side. The weight token carries grams; a bad weight leaves the
/// field undetermined but the row still succeeds as finished good.
fn finished_good(payload: &str) -> Extraction {
    let (left, right) = payload.split_once(" -").unwrap_or((payload, ""));

    let mut left_tokens = left.split('-');
    let branch = left_tokens.next().map(|t| t.trim().to_string());
    let product_code = left_tokens.next().map(|t| t.trim().to_string());

    let right_tokens: Vec<&str> = right.split('-').collect();
    let warehouse = right_tokens.first().map(|t| t.trim().to_string());
    let lot = right_tokens.get(1).map_or("", |t| t.trim()).to_string();
    let raw_weight = right_tokens.get(2).map_or("0", |t| t.trim());

    Extraction {
        branch,
        product_code,
        warehouse,
        lot,
        weight: Weight::from_grams(raw_weight),
        status: ExtractionStatus::Ok,
    }
}

// ── Coil / Code128 ────────────────────────────────────────────────────────────

/// Code128 coil labels: asterisk-delimited lot and gram weight, a bare short
/// digit run (weight only), or free text carried verbatim as the lot.
fn coil_code128(payload: &str) -> Extraction {
    if payload.contains(' ') {
        return Extraction::recovered(RecoveryKind::ReadError);
    }
    if payload.contains('*') {
        return match asterisk_fields(payload) {
            Some((lot, weight)) => Extraction::lot_only(lot, Some(weight)),
            None => Extraction::recovered(RecoveryKind::Code128Asterisk),
        };
    }
    if !payload.is_empty() && payload.len() <= 5 && payload.chars().all(|c| c.is_ascii_digit()) {
        return match Weight::from_grams(payload) {
            Some(weight) => Extraction::lot_only("", Some(weight)),
            None => Extraction::lot_only(payload, None),
        };
    }
    Extraction::lot_only(payload, None)
}

/// Token positions differ depending on whether the label starts with the
/// asterisk or carries a prefix before it.
fn asterisk_fields(payload: &str) -> Option<(String, Weight)> {
    let tokens: Vec<&str> = payload.split('*').collect();
    let (lot_idx, weight_idx) = if payload.starts_with('*') { (3, 2) } else { (2, 1) };
    let lot = tokens.get(lot_idx)?.trim().to_string();
    let weight = Weight::from_grams(tokens.get(weight_idx)?)?;
    Some((lot, weight))
}

// ── Coil / QR ─────────────────────────────────────────────────────────────────

/// QR-family coil labels, most to least specific: embedded JSON, the
/// comma-decimal layout, then the plain hyphen layout.
fn coil_qr(payload: &str) -> Extraction {
    if payload.contains('{') && payload.contains('}') {
        return match json_fields(payload) {
            Some((lot, weight)) => Extraction::lot_only(lot, Some(weight)),
            None => Extraction::recovered(RecoveryKind::QrJson),
        };
    }
    if payload.contains(',') && payload.contains('-') {
        return comma_decimal_fields(payload)
            .or_else(|| legacy_hyphen_fields(payload))
            .unwrap_or_else(|| Extraction::recovered(RecoveryKind::QrCommaFormat));
    }
    plain_hyphen(payload)
}

/// "LOT-{...}": the text before the first brace is the lot, trailing quotes
/// and hyphens trimmed; the rest is a JSON object whose `peso` field already
/// carries the final unit, so no gram division here.
fn json_fields(payload: &str) -> Option<(String, Weight)> {
    let (prefix, body) = payload.split_once('{')?;
    let lot = prefix.trim_end_matches(['"', '-']).to_string();

    let json: serde_json::Value = serde_json::from_str(&format!("{{{body}")).ok()?;
    let weight = match json.get("peso") {
        None => Weight::zero(),
        Some(serde_json::Value::Number(n)) => Weight::from_units(&n.to_string())?,
        Some(serde_json::Value::String(s)) => Weight::from_units(s)?,
        Some(_) => return None,
    };
    Some((lot, weight))
}

/// New-format QR labels put the weight's fractional digits after the last
/// comma: "BRANCH-CODE-WAREHOUSE-LOT-INT,FRAC". The weight is already in the
/// final unit. `None` means the layout did not fit and the legacy layout
/// should be tried.
fn comma_decimal_fields(payload: &str) -> Option<Extraction> {
    let comma_parts: Vec<&str> = payload.split(',').collect();
    if comma_parts.len() < 2 {
        return None;
    }
    let fraction = *comma_parts.last()?;
    let probe = fraction.replacen('.', "", 1);
    if probe.is_empty() || !probe.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let joined = comma_parts[..comma_parts.len() - 1].join(",");
    let hyphen_parts: Vec<&str> = joined.split('-').collect();
    if hyphen_parts.len() < 2 {
        return None;
    }
    let lot = hyphen_parts[hyphen_parts.len() - 2].trim().to_string();
    let integral = hyphen_parts.last()?.trim();
    let weight = Weight::from_units(&format!("{integral}.{}", fraction.trim()))?;

    // Only this sub-dialect carries the full finished-good-style prefix on a
    // coil label.
    let (branch, product_code, warehouse) = if hyphen_parts.len() >= 4 {
        (
            Some(hyphen_parts[0].trim().to_string()),
            Some(hyphen_parts[1].trim().to_string()),
            Some(hyphen_parts[2].trim().to_string()),
        )
    } else {
        (None, None, None)
    };

    Some(Extraction {
        branch,
        product_code,
        warehouse,
        lot,
        weight: Some(weight),
        status: ExtractionStatus::Ok,
    })
}

/// Legacy fallback for comma payloads: the fourth hyphen token is the lot,
/// the last token the weight in grams.
fn legacy_hyphen_fields(payload: &str) -> Option<Extraction> {
    let tokens: Vec<&str> = payload.split('-').collect();
    let lot = tokens.get(3)?.trim().to_string();
    let weight = Weight::from_grams(tokens.last()?)?;
    Some(Extraction::lot_only(lot, Some(weight)))
}

/// Old hyphen-only labels: the fourth token is the lot, the last token the
/// gram weight. Anything that does not fit carries the whole payload through
/// as the lot.
fn plain_hyphen(payload: &str) -> Extraction {
    let tokens: Vec<&str> = payload.split('-').collect();
    if tokens.len() >= 4 {
        if let Some(weight) = tokens.last().and_then(|t| Weight::from_grams(t)) {
            return Extraction::lot_only(tokens[3].trim(), Some(weight));
        }
    }
    Extraction::lot_only(payload, None)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
