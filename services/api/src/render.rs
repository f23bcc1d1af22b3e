use crate::infra::load_disclosure;
use autotruth::config::AppConfig;
use autotruth::error::AppError;
use autotruth::scoring::{
    AnalysisResult, ComparisonReport, Pillar, ScoringConfig, TransparencyEngine,
    TransparencyInsights,
};
use chrono::Local;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Disclosure JSON file (name, claims, pillar_scores, offsets, ...)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Replace the disclosure's claims with a CSV export
    #[arg(long)]
    pub(crate) claims_csv: Option<PathBuf>,
    /// Print the full result and insights as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Disclosure JSON file; repeat for each company
    #[arg(long, required = true)]
    pub(crate) input: Vec<PathBuf>,
    /// Print the comparison report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn engine() -> Result<TransparencyEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(TransparencyEngine::new(config.data.scoring_config()?))
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let engine = engine()?;
    let disclosure = load_disclosure(&args.input, args.claims_csv.as_deref())?;
    let result = engine.analyze(&disclosure);
    let insights = engine.insights(&result);

    if args.json {
        let payload = json!({ "result": result, "insights": insights });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Transparency report generated {}",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    for line in analysis_lines(&result, &insights) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let engine = engine()?;
    let disclosures = args
        .input
        .iter()
        .map(|path| load_disclosure(path, None))
        .collect::<Result<Vec<_>, _>>()?;
    let report = engine.compare(&disclosures);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for line in comparison_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_pillars() -> Result<(), AppError> {
    let engine = engine()?;
    for line in pillar_lines(engine.config()) {
        println!("{line}");
    }
    Ok(())
}

fn heading(result: &AnalysisResult) -> String {
    let mut heading = result
        .company
        .clone()
        .unwrap_or_else(|| "Unnamed disclosure".to_string());
    if let Some(model) = &result.model {
        heading.push(' ');
        heading.push_str(model);
    }
    if let Some(year) = result.report_year {
        heading.push_str(&format!(" ({year})"));
    }
    heading
}

pub(crate) fn analysis_lines(
    result: &AnalysisResult,
    insights: &TransparencyInsights,
) -> Vec<String> {
    let (low, high) = result.score_interval();
    let mut lines = vec![
        heading(result),
        format!(
            "- Lifecycle transparency score {:.1} [{:.1}, {:.1}] | {} | percentile {}",
            result.lts, low, high, result.tier_label, result.percentile
        ),
        format!("  {}", result.tier_description),
        format!(
            "- Greenwashing risk {:.1}% | momentum {} per pillar",
            result.risk.probability, result.momentum.sign
        ),
        format!(
            "- Investor ESG index {:.1} ({}) {}",
            result.esg_investor_index.score,
            result.esg_investor_index.rating.label(),
            result.esg_investor_index.interpretation
        ),
    ];

    let breakdown = &result.breakdown;
    lines.push("Score breakdown:".to_string());
    for (label, value) in [
        ("Pillar weighted base", breakdown.pillar_weighted_base),
        ("Claim quality", breakdown.claim_quality_adjustment),
        ("Offset penalty", breakdown.offset_penalty),
        ("Regulatory bonus", breakdown.regulatory_bonus),
        ("Grid penalty", breakdown.grid_penalty),
    ] {
        lines.push(format!("  - {label}: {value:+.2}"));
    }

    lines.push("Pillars:".to_string());
    for (pillar, entry) in result.temporal_drift.iter() {
        lines.push(format!(
            "  - {}: {:.1} ({:+.1}, {})",
            pillar.label(),
            result.pillar_scores.display_value(pillar),
            entry.delta,
            entry.trend.label()
        ));
    }

    let offsets = &result.offset_analysis;
    lines.push(format!(
        "Offsets: {:.0}% dependency | {} (quality {:.0}) | {}",
        offsets.offset_dependency_pct,
        offsets.offset_quality.label(),
        offsets.quality_score,
        offsets.risk_label
    ));

    if !result.claims.is_empty() {
        lines.push(format!(
            "Claims ({} numeric, {} vague, {} offset-backed):",
            result.claim_ratio.numeric_count,
            result.claim_ratio.vague_count,
            result.claim_ratio.offset_count
        ));
        for claim in &result.claims {
            lines.push(format!(
                "  - [{}] {} ({:+.0})",
                claim.claim_type.label(),
                claim.text,
                claim.impact_score
            ));
            if let Some(rewrite) = &claim.rewrite_suggestion {
                lines.push(format!("      rewrite: {rewrite}"));
            }
        }
    }

    if !insights.risk_drivers.is_empty() {
        lines.push("Risk drivers:".to_string());
        for driver in &insights.risk_drivers {
            lines.push(format!(
                "  - {} (+{:.1}): {}",
                driver.label, driver.contribution, driver.detail
            ));
        }
    }

    lines.push(format!(
        "Strongest pillar: {} | weakest pillar: {}",
        insights.strongest_pillar, insights.weakest_pillar
    ));
    lines.push("Observations:".to_string());
    lines.extend(insights.observations.iter().map(|note| format!("  - {note}")));
    if !insights.recommended_actions.is_empty() {
        lines.push("Recommended actions:".to_string());
        lines.extend(
            insights
                .recommended_actions
                .iter()
                .map(|action| format!("  - {action}")),
        );
    }

    lines
}

pub(crate) fn comparison_lines(report: &ComparisonReport) -> Vec<String> {
    if report.is_empty() {
        return vec!["No disclosures to compare".to_string()];
    }

    let mut lines = vec![format!("Comparison of {} disclosures", report.len())];
    for entry in &report.entries {
        lines.push(format!(
            "{}. {} | LTS {:.1} | {} | risk {:.1}%",
            entry.rank,
            heading(&entry.result),
            entry.result.lts,
            entry.standing_label,
            entry.risk_probability
        ));

        if entry.rank > 1 {
            let gaps: Vec<String> = entry
                .pillar_deltas
                .iter()
                .filter(|(_, delta)| **delta < 0.0)
                .map(|(pillar, delta)| format!("{} {:+.1}", pillar.key(), delta))
                .collect();
            if !gaps.is_empty() {
                lines.push(format!("   behind leader: {}", gaps.join(", ")));
            }
        }
    }
    lines
}

pub(crate) fn pillar_lines(config: &ScoringConfig) -> Vec<String> {
    Pillar::ordered()
        .into_iter()
        .map(|pillar| {
            format!(
                "{:<14} {:<26} weight {:.2}",
                pillar.key(),
                pillar.label(),
                config.weight(pillar)
            )
        })
        .collect()
}
