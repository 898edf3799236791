use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

use super::StatisticsRecord;

/// Reads a `;`-delimited statistics export. Rows with unreadable numbers are
/// skipped with a warning; structural CSV errors abort the import.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<StatisticsRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<StatisticsRow>().enumerate() {
        let row = row?;
        match row.into_record() {
            Ok(record) => records.push(record),
            Err(cell) => {
                // Header is line 1.
                warn!(line = index + 2, cell = %cell, "skipping statistics row with unreadable number");
            }
        }
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct StatisticsRow {
    jaar: String,
    #[serde(default)]
    hoofdthema: String,
    #[serde(default)]
    thema: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    kenmerken_cat: String,
    #[serde(default)]
    schuldenaren: String,
    #[serde(default)]
    gemeentenaam: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    percentage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    aantal: Option<String>,
}

impl StatisticsRow {
    fn into_record(self) -> Result<StatisticsRecord, String> {
        let percentage = match self.percentage {
            Some(raw) => Some(parse_decimal(&raw).ok_or(raw)?),
            None => None,
        };
        let aantal = match self.aantal {
            Some(raw) => Some(parse_count(&raw).ok_or(raw)?),
            None => None,
        };

        Ok(StatisticsRecord {
            jaar: self.jaar,
            hoofdthema: self.hoofdthema,
            thema: self.thema,
            label: self.label,
            kenmerken_cat: self.kenmerken_cat,
            schuldenaren: self.schuldenaren,
            gemeentenaam: self.gemeentenaam,
            percentage,
            aantal,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts Dutch decimal commas ("12,5") as well as dots.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().trim_matches('"').replace(',', ".");
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Counts may be exported in scientific notation ("2e+05").
pub(crate) fn parse_count(raw: &str) -> Option<u64> {
    let value = parse_decimal(raw)?;
    if value < 0.0 {
        return None;
    }
    Some(value.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_dutch_and_scientific_notation() {
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal("7.25"), Some(7.25));
        assert_eq!(parse_count("2e+05"), Some(200_000));
        assert_eq!(parse_count("1520"), Some(1520));
        assert_eq!(parse_decimal("n.v.t."), None);
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn parses_rows_and_skips_unreadable_numbers() {
        let csv = "\
jaar;hoofdthema;thema;label;kenmerken_cat;schuldenaren;gemeentenaam;percentage;aantal
2024-01;Kwetsbare groepen;Inkomen;Laag huishoudinkomen;0 Laag huishoudinkomen;Met geregistreerde schulden;Nederland;34,7;2e+05
2024-01;Kwetsbare groepen;Inkomen;Laag huishoudinkomen;0 Laag huishoudinkomen;Met geregistreerde schulden;Utrecht;;
2024-01;Kwetsbare groepen;Inkomen;Laag huishoudinkomen;0 Laag huishoudinkomen;Met geregistreerde schulden;Delft;veel;12
";

        let records = parse_records(csv.as_bytes()).expect("csv parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].percentage, Some(34.7));
        assert_eq!(records[0].aantal, Some(200_000));
        assert!(records[0].has_registered_debts());
        assert!(records[0].is_national());
        assert_eq!(records[1].gemeentenaam, "Utrecht");
        assert_eq!(records[1].percentage, None);
        assert_eq!(records[1].aantal, None);
    }
}
