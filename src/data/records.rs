use anyhow::{Result, anyhow};

/// Reported state of the decedent's air conditioning.
///
/// Unrecognized values in the source data deliberately map to `Unknown`
/// instead of falling through: every record must end up with a force
/// target and a fill color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AcStatus {
    Broken,
    Off,
    None,
    Unknown,
}

impl AcStatus {
    pub const ALL: [AcStatus; 4] = [Self::Broken, Self::Off, Self::None, Self::Unknown];

    pub fn label(self) -> &'static str {
        match self {
            Self::Broken => "broken",
            Self::Off => "off",
            Self::None => "none",
            Self::Unknown => "unknown",
        }
    }

    /// Strict parse of the four known categorical values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "broken" => Some(Self::Broken),
            "off" => Some(Self::Off),
            "none" => Some(Self::None),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// One decedent entry. Identity is the name; one bubble per record.
#[derive(Clone, Debug)]
pub struct Record {
    pub name: String,
    pub age: Option<u32>,
    pub temp: f32,
    pub year: u16,
    pub gender: String,
    pub air_conditioning: AcStatus,
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub temp_extent: (f32, f32),
    pub years: Vec<u16>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(anyhow!("dataset contains no usable records"));
        }

        let mut temp_min = f32::INFINITY;
        let mut temp_max = f32::NEG_INFINITY;
        let mut years = Vec::new();
        for record in &records {
            temp_min = temp_min.min(record.temp);
            temp_max = temp_max.max(record.temp);
            years.push(record.year);
        }
        years.sort_unstable();
        years.dedup();

        Ok(Self {
            records,
            temp_extent: (temp_min, temp_max),
            years,
        })
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn count_by_status(&self, status: AcStatus) -> usize {
        self.records
            .iter()
            .filter(|record| record.air_conditioning == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, temp: f32, year: u16, status: AcStatus) -> Record {
        Record {
            name: name.to_owned(),
            age: Some(70),
            temp,
            year,
            gender: "F".to_owned(),
            air_conditioning: status,
        }
    }

    #[test]
    fn parse_accepts_exactly_the_known_categories() {
        assert_eq!(AcStatus::parse("broken"), Some(AcStatus::Broken));
        assert_eq!(AcStatus::parse(" off "), Some(AcStatus::Off));
        assert_eq!(AcStatus::parse("none"), Some(AcStatus::None));
        assert_eq!(AcStatus::parse("unknown"), Some(AcStatus::Unknown));
        assert_eq!(AcStatus::parse("n/a"), None);
        assert_eq!(AcStatus::parse(""), None);
    }

    #[test]
    fn dataset_computes_extent_and_distinct_years() {
        let dataset = Dataset::new(vec![
            record("a", 101.0, 2019, AcStatus::Broken),
            record("b", 118.5, 2018, AcStatus::Off),
            record("c", 96.0, 2019, AcStatus::Unknown),
        ])
        .unwrap();

        assert_eq!(dataset.temp_extent, (96.0, 118.5));
        assert_eq!(dataset.years, vec![2018, 2019]);
        assert_eq!(dataset.record_count(), 3);
        assert_eq!(dataset.count_by_status(AcStatus::Broken), 1);
        assert_eq!(dataset.count_by_status(AcStatus::None), 0);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(Dataset::new(Vec::new()).is_err());
    }
}
