use serde::{Deserialize, Serialize};

const INTERNAL_HOURS: f64 = 4.0;
const HOURLY_RATE: f64 = 75.0;

/// Cost of pursuing a debt through the standard collection chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectCosts {
    pub reminder: f64,
    pub summons: f64,
    pub collection_agency: f64,
    pub bailiff: f64,
    pub court: f64,
    pub internal_hours: f64,
    pub total: f64,
}

impl DirectCosts {
    /// Fixed tariff table. The debt amount does not influence any line item.
    pub fn standard() -> Self {
        let reminder = 12.0;
        let summons = 25.0;
        let collection_agency = 73.0;
        let bailiff = 150.0;
        let court = 100.0;
        let internal_hours = INTERNAL_HOURS * HOURLY_RATE;

        Self {
            reminder,
            summons,
            collection_agency,
            bailiff,
            court,
            internal_hours,
            total: reminder + summons + collection_agency + bailiff + court + internal_hours,
        }
    }
}

pub(crate) fn direct_costs(_debt_amount: f64) -> DirectCosts {
    DirectCosts::standard()
}
