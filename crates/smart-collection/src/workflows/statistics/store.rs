use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::parser::parse_records;
use super::{
    AgeShare, BenefitShare, Demographics, HouseholdShare, IncomeStatistics, LabelPercentage,
    MunicipalityStatistic, OriginShare, StatisticEntry, StatisticsError, StatisticsRecord,
    StatisticsStore, ThemaOverview,
};

const TOP_LABELS_PER_THEMA: usize = 5;
const VULNERABLE_GROUPS_SHOWN: usize = 20;
const INCOME_LABELS_SHOWN: usize = 10;
const HOUSEHOLD_TYPES_SHOWN: usize = 10;
const ORIGINS_SHOWN: usize = 8;

const LOW_INCOME_LABEL: &str = "Laag huishoudinkomen";
const LOW_INCOME_CATEGORY: &str = "0 Laag huishoudinkomen";
const SOCIAL_SECURITY_THEMA: &str = "Sociale zekerheid";
const VULNERABLE_HOOFDTHEMA: &str = "Kwetsbare groepen";
const AGE_LABEL: &str = "Leeftijd geselecteerd huishoudlid";
const HOUSEHOLD_LABEL: &str = "Type huishouden";
const UNEMPLOYMENT_LABEL: &str = "WW-uitkering in huishouden";
const WITHOUT_UNEMPLOYMENT_CATEGORY: &str = "1 Geen WW-uitkering(en) in huishouden";

/// Statistics held in memory after a one-off import.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatistics {
    records: Vec<StatisticsRecord>,
}

impl InMemoryStatistics {
    pub fn new(records: Vec<StatisticsRecord>) -> Self {
        Self { records }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StatisticsError> {
        Ok(Self::new(parse_records(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StatisticsError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let store = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = store.len(),
            "statistics export loaded"
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows for `jaar` describing households with registered debts.
    fn debtors<'a>(
        &'a self,
        jaar: &'a str,
    ) -> Result<impl Iterator<Item = &'a StatisticsRecord> + 'a, StatisticsError> {
        if self.records.is_empty() {
            return Err(StatisticsError::Unavailable);
        }

        Ok(self
            .records
            .iter()
            .filter(move |record| record.jaar == jaar && record.has_registered_debts()))
    }

    /// National rows with a percentage, highest share first.
    fn national_percentages<'a>(
        &'a self,
        jaar: &'a str,
        keep: impl Fn(&StatisticsRecord) -> bool,
    ) -> Result<Vec<(&'a StatisticsRecord, f64)>, StatisticsError> {
        let mut rows: Vec<(&StatisticsRecord, f64)> = self
            .debtors(jaar)?
            .filter(|record| record.is_national() && keep(record))
            .filter_map(|record| record.percentage.map(|percentage| (record, percentage)))
            .collect();
        rows.sort_by(|a, b| descending(a.1, b.1));
        Ok(rows)
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[derive(Default)]
struct Average {
    sum: f64,
    count: usize,
}

impl Average {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

impl StatisticsStore for InMemoryStatistics {
    fn overview(&self, jaar: &str) -> Result<Vec<ThemaOverview>, StatisticsError> {
        let mut per_thema: BTreeMap<&str, (Average, BTreeMap<&str, Average>)> = BTreeMap::new();

        for record in self.debtors(jaar)? {
            let Some(percentage) = record.percentage else {
                continue;
            };
            let (thema_average, labels) = per_thema.entry(record.thema.as_str()).or_default();
            thema_average.add(percentage);
            labels.entry(record.label.as_str()).or_default().add(percentage);
        }

        let mut overview: Vec<ThemaOverview> = per_thema
            .into_iter()
            .map(|(thema, (average, labels))| {
                let mut top_labels: Vec<LabelPercentage> = labels
                    .into_iter()
                    .map(|(label, average)| LabelPercentage {
                        label: label.to_string(),
                        percentage: average.value(),
                    })
                    .collect();
                top_labels.sort_by(|a, b| descending(a.percentage, b.percentage));
                top_labels.truncate(TOP_LABELS_PER_THEMA);

                ThemaOverview {
                    thema: thema.to_string(),
                    total_records: average.count,
                    avg_percentage: average.value(),
                    top_labels,
                }
            })
            .collect();

        overview.sort_by(|a, b| descending(a.avg_percentage, b.avg_percentage));
        Ok(overview)
    }

    fn vulnerable_groups(&self, jaar: &str) -> Result<Vec<StatisticEntry>, StatisticsError> {
        let rows = self.national_percentages(jaar, |record| {
            record.hoofdthema == VULNERABLE_HOOFDTHEMA && record.kenmerken_cat.starts_with("0 ")
        })?;

        Ok(rows
            .into_iter()
            .take(VULNERABLE_GROUPS_SHOWN)
            .map(|(record, percentage)| StatisticEntry {
                thema: record.thema.clone(),
                label: record.label.clone(),
                percentage,
                aantal: record.aantal,
            })
            .collect())
    }

    fn income(&self, jaar: &str) -> Result<IncomeStatistics, StatisticsError> {
        let low_income = self
            .debtors(jaar)?
            .find(|record| {
                record.is_national()
                    && record.label == LOW_INCOME_LABEL
                    && record.kenmerken_cat == LOW_INCOME_CATEGORY
                    && record.percentage.is_some()
            })
            .and_then(|record| record.percentage)
            .unwrap_or(0.0);

        let benefits = self
            .national_percentages(jaar, |record| {
                record.thema == SOCIAL_SECURITY_THEMA
                    && record.kenmerken_cat.starts_with("0 ")
                    && (record.label.contains("uitkering") || record.label.contains("Bijstand"))
            })?
            .into_iter()
            .map(|(record, percentage)| BenefitShare {
                benefit_type: record.label.clone(),
                percentage,
            })
            .collect();

        let average_income = self
            .national_percentages(jaar, |record| record.label.contains("inkomen"))?
            .into_iter()
            .take(INCOME_LABELS_SHOWN)
            .map(|(record, percentage)| LabelPercentage {
                label: record.label.clone(),
                percentage,
            })
            .collect();

        Ok(IncomeStatistics {
            low_income,
            benefits,
            average_income,
        })
    }

    fn demographics(&self, jaar: &str) -> Result<Demographics, StatisticsError> {
        let mut age = self.national_percentages(jaar, |record| record.label == AGE_LABEL)?;
        age.sort_by(|a, b| a.0.kenmerken_cat.cmp(&b.0.kenmerken_cat));

        let household = self
            .national_percentages(jaar, |record| record.label == HOUSEHOLD_LABEL)?
            .into_iter()
            .take(HOUSEHOLD_TYPES_SHOWN)
            .map(|(record, percentage)| HouseholdShare {
                household_type: record.kenmerken_cat.clone(),
                percentage,
            })
            .collect();

        let origin = self
            .national_percentages(jaar, |record| record.label.contains("Herkomst"))?
            .into_iter()
            .take(ORIGINS_SHOWN)
            .map(|(record, percentage)| OriginShare {
                category: record.kenmerken_cat.clone(),
                percentage,
            })
            .collect();

        Ok(Demographics {
            age: age
                .into_iter()
                .map(|(record, percentage)| AgeShare {
                    range: record.kenmerken_cat.clone(),
                    percentage,
                })
                .collect(),
            household,
            origin,
        })
    }

    fn top_municipalities(
        &self,
        jaar: &str,
        limit: usize,
    ) -> Result<Vec<MunicipalityStatistic>, StatisticsError> {
        let mut municipalities: Vec<MunicipalityStatistic> = self
            .debtors(jaar)?
            .filter(|record| {
                !record.is_national()
                    && record.label == UNEMPLOYMENT_LABEL
                    && record.kenmerken_cat == WITHOUT_UNEMPLOYMENT_CATEGORY
            })
            .filter_map(|record| {
                record.aantal.map(|aantal| MunicipalityStatistic {
                    gemeentenaam: record.gemeentenaam.clone(),
                    avg_percentage: record.percentage,
                    total_records: aantal,
                })
            })
            .collect();

        municipalities.sort_by(|a, b| b.total_records.cmp(&a.total_records));
        municipalities.truncate(limit);
        Ok(municipalities)
    }

    fn total_debtors(&self, jaar: &str) -> Result<u64, StatisticsError> {
        Ok(self
            .debtors(jaar)?
            .filter(|record| record.is_national())
            .filter_map(|record| record.aantal)
            .max()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        thema: &str,
        label: &str,
        category: &str,
        gemeente: &str,
        percentage: Option<f64>,
        aantal: Option<u64>,
    ) -> StatisticsRecord {
        StatisticsRecord {
            jaar: "2024-01".to_string(),
            hoofdthema: "Kwetsbare groepen".to_string(),
            thema: thema.to_string(),
            label: label.to_string(),
            kenmerken_cat: category.to_string(),
            schuldenaren: "Met geregistreerde schulden".to_string(),
            gemeentenaam: gemeente.to_string(),
            percentage,
            aantal,
        }
    }

    #[test]
    fn empty_store_is_unavailable() {
        let store = InMemoryStatistics::default();
        assert!(matches!(
            store.overview("2024-01"),
            Err(StatisticsError::Unavailable)
        ));
        assert!(matches!(
            store.total_debtors("2024-01"),
            Err(StatisticsError::Unavailable)
        ));
    }

    #[test]
    fn overview_averages_per_thema_and_ignores_other_debtors() {
        let mut without_debts = record("Inkomen", "Laag huishoudinkomen", "0 x", "Nederland", Some(90.0), None);
        without_debts.schuldenaren = "Zonder geregistreerde schulden".to_string();

        let store = InMemoryStatistics::new(vec![
            record("Inkomen", "Laag huishoudinkomen", "0 x", "Nederland", Some(40.0), None),
            record("Inkomen", "Hoog huishoudinkomen", "0 x", "Nederland", Some(10.0), None),
            record("Wonen", "Huurwoning", "0 x", "Nederland", Some(60.0), None),
            record("Wonen", "Koopwoning", "0 x", "Nederland", None, Some(5)),
            without_debts,
        ]);

        let overview = store.overview("2024-01").expect("overview");

        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].thema, "Wonen");
        assert_eq!(overview[0].total_records, 1);
        assert_eq!(overview[1].thema, "Inkomen");
        assert_eq!(overview[1].avg_percentage, 25.0);
        assert_eq!(overview[1].top_labels[0].label, "Laag huishoudinkomen");
    }

    #[test]
    fn municipalities_rank_by_household_count() {
        let store = InMemoryStatistics::new(vec![
            record("Sociale zekerheid", UNEMPLOYMENT_LABEL, WITHOUT_UNEMPLOYMENT_CATEGORY, "Utrecht", Some(96.0), Some(9000)),
            record("Sociale zekerheid", UNEMPLOYMENT_LABEL, WITHOUT_UNEMPLOYMENT_CATEGORY, "Amsterdam", Some(97.0), Some(30000)),
            record("Sociale zekerheid", UNEMPLOYMENT_LABEL, WITHOUT_UNEMPLOYMENT_CATEGORY, "Nederland", Some(96.5), Some(600000)),
            record("Sociale zekerheid", UNEMPLOYMENT_LABEL, WITHOUT_UNEMPLOYMENT_CATEGORY, "Delft", Some(95.0), None),
        ]);

        let top = store.top_municipalities("2024-01", 1).expect("municipalities");
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].gemeentenaam, "Amsterdam");
        assert_eq!(top[0].total_records, 30000);

        assert_eq!(store.total_debtors("2024-01").expect("total"), 600000);
        assert_eq!(store.total_debtors("2023-01").expect("total"), 0);
    }

    #[test]
    fn low_income_defaults_to_zero_when_absent() {
        let store = InMemoryStatistics::new(vec![record(
            "Sociale zekerheid",
            "Bijstandsuitkering in huishouden",
            "0 Bijstand",
            "Nederland",
            Some(22.0),
            None,
        )]);

        let income = store.income("2024-01").expect("income");
        assert_eq!(income.low_income, 0.0);
        assert_eq!(income.benefits.len(), 1);
        assert_eq!(income.benefits[0].benefit_type, "Bijstandsuitkering in huishouden");
    }
}
