//! Semicolon-delimited event table reader.
//!
//! Column order: id, date, time (UTC), latitude, longitude, depth (km),
//! magnitude, region, locality. Trailing columns are ignored. Numeric fields
//! that fail to parse come through as NaN rather than rejecting the row.
//! Quotes carry no meaning; a `"` is kept as part of its field.

use crate::error::LoadError;
use crate::record::EventRecord;
use std::path::Path;

const DELIMITER: u8 = b';';

/// Parse the full table text. The first row is treated as the header.
pub fn parse_table(text: &str) -> Result<Vec<EventRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|f| f.is_empty()) {
            continue;
        }
        out.push(record_from_row(&row));
    }
    log::info!("[data] parsed {} event rows", out.len());
    Ok(out)
}

/// Read and parse a table from disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<EventRecord>, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_table(&text)
}

/// Collapse a load result into a record list, logging failures.
///
/// A failed load leaves the session running with zero records.
pub fn records_or_empty(result: Result<Vec<EventRecord>, LoadError>) -> Vec<EventRecord> {
    match result {
        Ok(records) => records,
        Err(e) => {
            log::error!("[data] load failed, continuing without events: {}", e);
            Vec::new()
        }
    }
}

fn record_from_row(row: &csv::StringRecord) -> EventRecord {
    let text = |i: usize| row.get(i).unwrap_or_default().to_string();
    let num = |i: usize| parse_f32(row.get(i).unwrap_or_default());
    EventRecord {
        id: text(0),
        date: text(1),
        time: text(2),
        latitude: num(3),
        longitude: num(4),
        depth_km: num(5),
        magnitude: num(6),
        region: text(7),
        locality: text(8),
    }
}

#[inline]
fn parse_f32(field: &str) -> f32 {
    field.parse::<f32>().unwrap_or(f32::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f32_maps_garbage_to_nan() {
        assert_eq!(parse_f32("12.5"), 12.5);
        assert!(parse_f32("").is_nan());
        assert!(parse_f32("n/a").is_nan());
        // decimal commas are not converted
        assert!(parse_f32("3,4").is_nan());
    }

    #[test]
    fn short_rows_fill_missing_fields() {
        let recs = parse_table("h1;h2\n7;2024-01-01;10:00:00;64.1\n").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "7");
        assert_eq!(recs[0].latitude, 64.1);
        assert!(recs[0].longitude.is_nan());
        assert!(recs[0].magnitude.is_nan());
        assert_eq!(recs[0].locality, "");
    }

    #[test]
    fn stray_quote_stays_inside_its_field() {
        let text = "Nr;Date;Time;Lat;Lon;Depth;Mag;Region;Locality\n\
                    1;2024-01-01;01:00:00;63.6;-19.1;3.0;1.2;Myrdalsjokull;\"Katla\n\
                    2;2024-01-01;02:00:00;64.0;-21.2;8.0;0.9;Hengill;Hveragerdi\n\
                    3;2024-01-01;03:00:00;66.2;-17.5;12.0;2.1;Tjornes;Husavik\n";
        let recs = parse_table(text).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].locality, "\"Katla");
        assert_eq!(recs[1].region, "Hengill");
        assert_eq!(recs[2].magnitude, 2.1);
    }
}
