use std::borrow::Cow;

use thiserror::Error;

use inventario_core::MovementRecord;

use crate::classify;
use crate::date;
use crate::extract::{self, Extraction};
use crate::row::RawRow;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Decode a whole export file: UTF-8 first, Latin-1 when that fails.
/// Latin-1 decoding is total (every byte maps to the same code point), so a
/// file can only fail at the structural CSV level, never at decoding.
pub fn decode(data: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(data) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(data.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Parse one export file into normalized records.
///
/// Row-level problems never fail the file: unusable rows are skipped by the
/// filter and recoverable payloads are emitted with a marker lot. Output
/// order matches input row order.
pub fn import_bytes(data: &[u8], source_label: &str) -> Result<Vec<MovementRecord>, ImportError> {
    let text = decode(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if let Some(row) = RawRow::from_record(&record) {
            records.push(assemble(&row, source_label));
        }
    }
    Ok(records)
}

/// Merge the filter, date, and extraction results into the output shape.
/// Every field comes from exactly one place; nothing is patched afterwards.
fn assemble(row: &RawRow, source_label: &str) -> MovementRecord {
    let dialect = classify::classify(&row.payload, &row.symbology);
    let Extraction { branch, product_code, warehouse, lot, weight, status } =
        extract::extract(dialect, &row.payload);

    MovementRecord {
        read_date: date::normalize_read_date(&row.read_date),
        read_time: row.read_time.clone(),
        branch,
        product_code,
        warehouse,
        lot,
        weight,
        source_label: source_label.to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventario_core::ExtractionStatus;

    #[test]
    fn imports_mixed_rows_in_input_order() {
        let data = b"\
03-15-2024,10:00:00,1,,05-123 - 01-LOT1-2500\n\
03-15-2024,10:00:05,2,Code128,*A*1500*LOT9*\n\
03-15-2024,10:00:09,3,QR_CODE,05-BFQ030011000007-01-O504927-10,360\n";
        let records = import_bytes(data, "turno1").unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].lot, "LOT1");
        assert_eq!(records[0].branch.as_deref(), Some("05"));
        assert_eq!(records[1].lot, "LOT9");
        assert_eq!(records[2].lot, "O504927");
        assert!(records.iter().all(|r| r.source_label == "turno1"));
        assert!(records.iter().all(|r| r.read_date == "15/03/2024"));
    }

    #[test]
    fn comma_weight_survives_the_field_split() {
        // The trailing ",360" lands in a sixth field; the payload dialect only
        // sees "…-10" so the legacy hyphen layout applies. A quoted payload
        // keeps the comma intact.
        let data =
            b"03-15-2024,10:00:00,1,QR_CODE,\"05-BFQ030011000007-01-O504927-10,360\"\n";
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records[0].lot, "O504927");
        assert_eq!(records[0].weight.unwrap().to_string(), "10.360");
        assert_eq!(records[0].branch.as_deref(), Some("05"));
    }

    #[test]
    fn header_and_garbage_rows_are_skipped_silently() {
        let data = b"\
Date,Time,Num,Type,Data\n\
short,row\n\
03-15-2024,10:00:00,1,Code128,1500\n\
not-a-date,10:00:01,2,Code128,1500\n";
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight.unwrap().to_string(), "1.500");
    }

    #[test]
    fn unparseable_date_passes_through() {
        let data = b"15/03/2024,10:00:00,1,Code128,1500\n";
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records[0].read_date, "15/03/2024");
    }

    #[test]
    fn latin1_bytes_decode_via_fallback() {
        // 0xE9 is 'é' in Latin-1 and invalid on its own in UTF-8.
        let data = b"03-15-2024,10:00:00,1,Code128,BOBINA_\xC9_7\n";
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records[0].lot, "BOBINA_É_7");
    }

    #[test]
    fn utf8_input_is_not_touched_by_the_fallback() {
        let data = "03-15-2024,10:00:00,1,Code128,BOBINA_É_7\n".as_bytes();
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records[0].lot, "BOBINA_É_7");
    }

    #[test]
    fn recovered_rows_are_emitted_not_dropped() {
        let data = b"03-15-2024,10:00:00,1,Code128,AB CD\n";
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lot, "erro de leitura");
        assert!(records[0].status.is_recovered());
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(import_bytes(b"", "x").unwrap().is_empty());
    }

    #[test]
    fn two_files_keep_their_own_labels_and_order() {
        let a = b"03-15-2024,08:00:00,1,Code128,1000\n03-15-2024,08:00:01,2,Code128,2000\n";
        let b = b"03-16-2024,09:00:00,1,Code128,3000\n";

        let mut all = import_bytes(a, "file_a").unwrap();
        all.extend(import_bytes(b, "file_b").unwrap());

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].weight.unwrap().to_string(), "1.000");
        assert_eq!(all[1].weight.unwrap().to_string(), "2.000");
        assert_eq!(all[0].source_label, "file_a");
        assert_eq!(all[1].source_label, "file_a");
        assert_eq!(all[2].source_label, "file_b");
        assert_eq!(all[2].read_date, "16/03/2024");
    }

    #[test]
    fn every_emitted_weight_is_non_negative() {
        let data = b"\
03-15-2024,10:00:00,1,Code128,*A*1500*LOT9*\n\
03-15-2024,10:00:01,2,QR_CODE,\"LOT1-{\"\"peso\"\": 42.5}\"\n\
03-15-2024,10:00:02,3,Code128,99\n";
        let records = import_bytes(data, "x").unwrap();
        assert_eq!(records.len(), 3);
        for record in &records {
            if let Some(w) = record.weight {
                assert!(w.value() >= rust_decimal::Decimal::ZERO);
            }
        }
        assert_eq!(records[0].status, ExtractionStatus::Ok);
    }
}
