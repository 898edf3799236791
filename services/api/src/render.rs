use clap::Args;
use smart_collection::error::AppError;
use smart_collection::workflows::collection::{
    sample_cases, AnalysisReport, CostCalculator, DebtAnalysisRequest, PortfolioAnalyzer,
    PortfolioFilters, PortfolioReport,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// JSON file holding a `{debt, citizen}` case
    #[arg(long, conflicts_with = "sample")]
    pub(crate) input: Option<PathBuf>,
    /// Index into the demonstration cases (defaults to the first one)
    #[arg(long)]
    pub(crate) sample: Option<usize>,
    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PortfolioArgs {
    /// Only include debts below this amount in euro
    #[arg(long, default_value_t = 100.0)]
    pub(crate) amount_less_than: f64,
    /// Maximum number of debts to analyze
    #[arg(long, default_value_t = 1000)]
    pub(crate) limit: usize,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let request = load_case(args.input, args.sample)?;
    let report = CostCalculator::new().analyze(&request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report_lines(&request, &report) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_portfolio(args: PortfolioArgs) -> Result<(), AppError> {
    let filters = PortfolioFilters {
        amount_less_than: args.amount_less_than,
        limit: args.limit,
    };
    let report = PortfolioAnalyzer::default().analyze(&sample_cases(), &filters);

    for line in portfolio_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

fn load_case(
    input: Option<PathBuf>,
    sample: Option<usize>,
) -> Result<DebtAnalysisRequest, AppError> {
    if let Some(path) = input {
        let raw = std::fs::read(&path)?;
        return serde_json::from_slice(&raw).map_err(|err| {
            AppError::InvalidRequest(format!("{} is not a valid case: {err}", path.display()))
        });
    }

    let index = sample.unwrap_or(0);
    let cases = sample_cases();
    let total = cases.len();
    cases.into_iter().nth(index).ok_or_else(|| {
        AppError::InvalidRequest(format!(
            "sample index {index} is out of range (0..{total})"
        ))
    })
}

pub(crate) fn report_lines(request: &DebtAnalysisRequest, report: &AnalysisReport) -> Vec<String> {
    let financial = &report.financial_analysis;
    let mut lines = vec![
        format!("Analysis {} ({})", report.analysis_id, report.timestamp),
        format!(
            "- Debt: EUR {:.2} {} | income EUR {:.0} ({})",
            request.debt.amount,
            request.debt.debt_type.as_str(),
            request.citizen.income,
            request.citizen.income_source.as_str()
        ),
        format!(
            "- Collection costs EUR {:.0} | success probability {:.0}% | net result EUR {:.2}",
            financial.collection_costs.total,
            financial.success_probability * 100.0,
            financial.net_result
        ),
        format!(
            "- Risk score {}/100 | societal cost EUR {:.0}",
            report.societal_impact.risk_score,
            report.societal_impact.estimated_costs.total_societal_cost
        ),
        "Alternatives:".to_string(),
    ];

    for scenario in &report.alternatives {
        lines.push(format!(
            "  - {}: benefit EUR {:.2} (costs EUR {:.0}, revenue EUR {:.2})",
            scenario.action.label(),
            scenario.total_benefit,
            scenario.costs,
            scenario.expected_revenue
        ));
    }

    let recommendation = &report.recommendation;
    lines.push(format!(
        "Recommendation: {} (confidence {:.0}%)",
        recommendation.action.label(),
        recommendation.confidence
    ));
    lines.extend(recommendation.reasoning.iter().map(|reason| format!("  * {reason}")));
    lines.extend(
        recommendation
            .suggested_steps
            .iter()
            .enumerate()
            .map(|(idx, step)| format!("  {}. {step}", idx + 1)),
    );
    lines.push(format!(
        "Estimated savings: EUR {:.2} direct + EUR {:.2} societal = EUR {:.2}",
        report.estimated_savings.direct,
        report.estimated_savings.societal,
        report.estimated_savings.total
    ));
    lines
}

pub(crate) fn portfolio_lines(report: &PortfolioReport) -> Vec<String> {
    let summary = &report.summary;
    let breakdown = &report.recommendations;
    let impact = &report.impact;

    let mut lines = vec![
        format!(
            "Portfolio: {} debts | EUR {:.2} total | EUR {:.2} average",
            summary.total_debts, summary.total_amount, summary.average_amount
        ),
        format!(
            "- forgive {} | payment plan {} | consolidate {} | standard {} | assistance {}",
            breakdown.forgive.count,
            breakdown.payment_plan.count,
            breakdown.consolidate.count,
            breakdown.collect_standard.count,
            breakdown.refer_to_assistance.count
        ),
        format!(
            "- Standard collection: costs EUR {:.0}, revenue EUR {:.2}, total loss EUR {:.0}",
            impact.traditional_approach.collection_costs,
            impact.traditional_approach.expected_revenue,
            impact.traditional_approach.total_loss
        ),
        format!(
            "- Following recommendations: costs EUR {:.0}, revenue EUR {:.2}, total benefit EUR {:.0}",
            impact.smart_collection_approach.collection_costs,
            impact.smart_collection_approach.expected_revenue,
            impact.smart_collection_approach.total_benefit
        ),
        format!(
            "- Savings EUR {:.0} per month, EUR {:.0} per year",
            impact.savings.total, impact.savings.per_year
        ),
    ];

    if !report.top_wasteful_debt_types.is_empty() {
        lines.push("Most wasteful debt types:".to_string());
        for entry in &report.top_wasteful_debt_types {
            lines.push(format!(
                "  - {}: {} debts, loss EUR {:.0}",
                entry.debt_type, entry.count, entry.loss
            ));
        }
    }
    lines
}
