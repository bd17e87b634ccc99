use std::io::Read;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;

use super::records::{AcStatus, Dataset, Record};

/// Raw CSV row as it appears in the source file. Everything except the
/// name is kept as text here; normalization decides what is usable.
#[derive(Clone, Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age", default)]
    age: String,
    #[serde(rename = "Temp_cleaned", default)]
    temp: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Gender", default)]
    gender: String,
    #[serde(rename = "air_conditioning", default)]
    air_conditioning: String,
}

fn normalize_record(raw: RawRecord) -> Option<Record> {
    let name = raw.name.trim().to_owned();
    if name.is_empty() {
        warn!("skipping row with empty Name");
        return None;
    }

    let temp = match raw.temp.trim().parse::<f32>() {
        Ok(temp) if temp.is_finite() => temp,
        _ => {
            warn!("skipping {name:?}: unusable Temp_cleaned value {:?}", raw.temp);
            return None;
        }
    };

    let Ok(year) = raw.year.trim().parse::<u16>() else {
        warn!("skipping {name:?}: unusable Year value {:?}", raw.year);
        return None;
    };

    let air_conditioning = AcStatus::parse(&raw.air_conditioning).unwrap_or_else(|| {
        warn!(
            "{name:?}: unrecognized air_conditioning value {:?}, treating as unknown",
            raw.air_conditioning
        );
        AcStatus::Unknown
    });

    Some(Record {
        name,
        age: raw.age.trim().parse().ok(),
        temp,
        year,
        gender: raw.gender.trim().to_owned(),
        air_conditioning,
    })
}

fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader.deserialize::<RawRecord>() {
        // one bad row never aborts the load, same policy as
        // normalize_record for bad field values
        let raw = match row {
            Ok(raw) => raw,
            Err(error) => {
                warn!("skipping malformed row: {error}");
                skipped += 1;
                continue;
            }
        };
        match normalize_record(raw) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("skipped {skipped} unusable rows");
    }
    Ok(records)
}

pub fn load_dataset(path: &str) -> Result<Dataset> {
    let file = std::fs::File::open(path).with_context(|| format!("failed to open {path}"))?;
    let records = read_records(file).with_context(|| format!("failed to read {path}"))?;
    let dataset = Dataset::new(records).with_context(|| format!("no usable records in {path}"))?;

    info!(
        "loaded {} records from {path} ({} years, indoor temps {:.0}-{:.0} F)",
        dataset.record_count(),
        dataset.years.len(),
        dataset.temp_extent.0,
        dataset.temp_extent.1,
    );
    for status in AcStatus::ALL {
        debug!("  {}: {}", status.label(), dataset.count_by_status(status));
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Age,Temp_cleaned,Year,Gender,air_conditioning\n";

    fn read(csv_body: &str) -> Vec<Record> {
        let text = format!("{HEADER}{csv_body}");
        read_records(text.as_bytes()).unwrap()
    }

    #[test]
    fn reads_well_formed_rows() {
        let records = read(
            "James Allen Dickinson,71,107.6,2018,M,broken\n\
             Erminia Quihuis Chacon,82,99.0,2019,F,off\n",
        );

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "James Allen Dickinson");
        assert_eq!(records[0].age, Some(71));
        assert_eq!(records[0].temp, 107.6);
        assert_eq!(records[0].year, 2018);
        assert_eq!(records[0].air_conditioning, AcStatus::Broken);
        assert_eq!(records[1].air_conditioning, AcStatus::Off);
    }

    #[test]
    fn skips_rows_with_unusable_temperature_or_year() {
        let records = read(
            "Good Row,60,101.0,2018,M,none\n\
             Bad Temp,60,not-a-number,2018,M,none\n\
             Bad Year,60,101.0,,M,none\n",
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good Row");
    }

    #[test]
    fn unrecognized_status_becomes_unknown() {
        let records = read("Someone,90,104.0,2019,F,window unit\n");
        assert_eq!(records[0].air_conditioning, AcStatus::Unknown);
    }

    #[test]
    fn non_finite_temperatures_are_rejected() {
        let records = read(
            "NaN Temp,60,NaN,2018,M,none\n\
             Inf Temp,60,inf,2018,F,off\n\
             Fine,60,101.0,2018,M,none\n",
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Fine");
    }

    #[test]
    fn rows_with_wrong_field_counts_are_skipped_not_fatal() {
        let records = read(
            "Good Row,60,101.0,2018,M,none\n\
             Stub Row\n\
             Another Good,70,99.5,2017,F,off\n",
        );

        let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
        assert!(names.contains(&"Good Row"));
        assert!(names.contains(&"Another Good"));
        assert!(!names.contains(&"Stub Row"));
    }

    #[test]
    fn missing_age_is_tolerated() {
        let records = read("Someone,,104.0,2019,F,unknown\n");
        assert_eq!(records[0].age, None);
    }
}
