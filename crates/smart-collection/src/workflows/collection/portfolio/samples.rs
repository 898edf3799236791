use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::super::domain::{
    parse_date, CitizenProfile, DebtAnalysisRequest, DebtRecord, DebtType, IncomeSource,
    PaymentRecord,
};

const SYNTHETIC_CASES: u64 = 100;
const SYNTHETIC_SEED: u64 = 0x5C0_11EC7;
const FIRST_SYNTHETIC_BSN: u64 = 100_000_000;

/// Demonstration portfolio: ten curated cases followed by a deterministic
/// synthetic tail of small municipal debts.
pub fn sample_cases() -> Vec<DebtAnalysisRequest> {
    let mut cases = curated_cases();
    let mut rng = StdRng::seed_from_u64(SYNTHETIC_SEED);
    cases.extend((0..SYNTHETIC_CASES).map(|index| synthetic_case(&mut rng, index)));
    cases
}

struct Curated {
    amount: f64,
    debt_type: DebtType,
    origin: &'static str,
    due: &'static str,
    bsn: &'static str,
    income: f64,
    income_source: IncomeSource,
    other_debts: u32,
    assisted: bool,
    payments: &'static [(&'static str, f64, u32)],
}

impl Curated {
    fn into_request(self) -> DebtAnalysisRequest {
        DebtAnalysisRequest {
            debt: DebtRecord {
                amount: self.amount,
                debt_type: self.debt_type,
                origin_date: parse_date(self.origin),
                due_date: parse_date(self.due),
                id: None,
            },
            citizen: CitizenProfile {
                bsn: Some(self.bsn.to_string()),
                id: None,
                income: self.income,
                income_source: self.income_source,
                other_debts_count: self.other_debts,
                in_debt_assistance: self.assisted,
                payment_history: self
                    .payments
                    .iter()
                    .map(|&(date, amount, days_late)| PaymentRecord {
                        date: parse_date(date),
                        amount,
                        days_late,
                    })
                    .collect(),
            },
        }
    }
}

fn curated_cases() -> Vec<DebtAnalysisRequest> {
    let curated = [
        Curated {
            amount: 8.5,
            debt_type: DebtType::CakEigenBijdrage,
            origin: "2024-09-15",
            due: "2024-09-30",
            bsn: "123456789",
            income: 1450.0,
            income_source: IncomeSource::BenefitSocial,
            other_debts: 3,
            assisted: false,
            payments: &[("2024-08-15", 8.5, 12), ("2024-07-15", 8.5, 8)],
        },
        Curated {
            amount: 65.0,
            debt_type: DebtType::Parkeerboete,
            origin: "2024-10-01",
            due: "2024-10-15",
            bsn: "987654321",
            income: 2200.0,
            income_source: IncomeSource::Employment,
            other_debts: 1,
            assisted: false,
            payments: &[("2024-09-01", 65.0, 5)],
        },
        Curated {
            amount: 85.0,
            debt_type: DebtType::Hondenbelasting,
            origin: "2024-01-01",
            due: "2024-02-01",
            bsn: "111222333",
            income: 1650.0,
            income_source: IncomeSource::BenefitUnemployment,
            other_debts: 4,
            assisted: true,
            payments: &[("2023-12-15", 85.0, 45), ("2023-11-15", 85.0, 30)],
        },
        Curated {
            amount: 42.0,
            debt_type: DebtType::Afvalstoffenheffing,
            origin: "2024-08-01",
            due: "2024-09-01",
            bsn: "444555666",
            income: 1850.0,
            income_source: IncomeSource::BenefitDisability,
            other_debts: 2,
            assisted: false,
            payments: &[("2024-07-01", 42.0, 0), ("2024-06-01", 42.0, 3)],
        },
        Curated {
            amount: 120.0,
            debt_type: DebtType::BijzondereBijstand,
            origin: "2024-09-01",
            due: "2024-10-01",
            bsn: "777888999",
            income: 1350.0,
            income_source: IncomeSource::BenefitSocial,
            other_debts: 5,
            assisted: true,
            payments: &[("2024-08-01", 100.0, 20), ("2024-07-01", 120.0, 35)],
        },
        Curated {
            amount: 89.0,
            debt_type: DebtType::Studiefinanciering,
            origin: "2024-09-15",
            due: "2024-10-15",
            bsn: "222333444",
            income: 800.0,
            income_source: IncomeSource::SelfEmployed,
            other_debts: 1,
            assisted: false,
            payments: &[("2024-08-15", 89.0, 0)],
        },
        Curated {
            amount: 45.0,
            debt_type: DebtType::ZorgverzekeringPremie,
            origin: "2024-10-01",
            due: "2024-10-10",
            bsn: "555666777",
            income: 2500.0,
            income_source: IncomeSource::Employment,
            other_debts: 0,
            assisted: false,
            payments: &[("2024-09-01", 45.0, 0), ("2024-08-01", 45.0, 0)],
        },
        Curated {
            amount: 95.0,
            debt_type: DebtType::Verkeersboete,
            origin: "2024-09-20",
            due: "2024-10-20",
            bsn: "888999000",
            income: 1950.0,
            income_source: IncomeSource::Pension,
            other_debts: 0,
            assisted: false,
            payments: &[],
        },
        Curated {
            amount: 12.0,
            debt_type: DebtType::CakEigenBijdrage,
            origin: "2024-10-01",
            due: "2024-10-15",
            bsn: "123123123",
            income: 1400.0,
            income_source: IncomeSource::BenefitSocial,
            other_debts: 6,
            assisted: true,
            payments: &[
                ("2024-09-01", 12.0, 25),
                ("2024-08-01", 12.0, 18),
                ("2024-07-01", 12.0, 30),
            ],
        },
        Curated {
            amount: 35.0,
            debt_type: DebtType::Parkeerboete,
            origin: "2024-10-10",
            due: "2024-10-25",
            bsn: "456456456",
            income: 3200.0,
            income_source: IncomeSource::Employment,
            other_debts: 0,
            assisted: false,
            payments: &[],
        },
    ];

    curated.into_iter().map(Curated::into_request).collect()
}

fn first_of_month(month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, month, 1)
}

fn synthetic_case(rng: &mut StdRng, index: u64) -> DebtAnalysisRequest {
    let debt_type = DebtType::KNOWN[rng.random_range(0..DebtType::KNOWN.len())].clone();
    let income_source =
        IncomeSource::KNOWN[rng.random_range(0..IncomeSource::KNOWN.len())].clone();

    let debt = DebtRecord {
        amount: f64::from(rng.random_range(10u32..100)),
        debt_type,
        origin_date: first_of_month(rng.random_range(1..=10)),
        due_date: first_of_month(rng.random_range(2..=11)),
        id: None,
    };

    let payments = rng.random_range(0..4);
    let payment_history = (0..payments)
        .map(|_| PaymentRecord {
            date: first_of_month(rng.random_range(1..=10)),
            amount: f64::from(rng.random_range(10u32..100)),
            days_late: rng.random_range(0..40),
        })
        .collect();

    DebtAnalysisRequest {
        debt,
        citizen: CitizenProfile {
            bsn: Some((FIRST_SYNTHETIC_BSN + index).to_string()),
            id: None,
            income: f64::from(rng.random_range(1000u32..3500)),
            income_source,
            other_debts_count: rng.random_range(0..6),
            in_debt_assistance: rng.random_bool(0.3),
            payment_history,
        },
    }
}
