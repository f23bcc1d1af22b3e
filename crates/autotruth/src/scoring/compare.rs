use super::config::ScoringConfig;
use super::domain::PillarMap;
use super::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Position of a company within a comparison set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Leader,
    Watchlist,
    Risk,
}

impl Standing {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Watchlist => "Watchlist",
            Self::Risk => "Risk",
        }
    }

    fn for_position(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Leader
        } else if index + 1 == len {
            Self::Risk
        } else {
            Self::Watchlist
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub rank: usize,
    /// Registry id, set when the comparison was built from stored companies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub standing: Standing,
    pub standing_label: &'static str,
    /// Own pillar score minus the leader's.
    pub pillar_deltas: PillarMap<f64>,
    pub risk_probability: f64,
    pub result: AnalysisResult,
}

/// Rank-ordered comparison; index 0 is the leader.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonReport {
    pub fn leader(&self) -> Option<&ComparisonEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Registry identity carried through ranking.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompanyTag {
    pub(crate) id: String,
    pub(crate) logo: String,
}

fn descending_lts(left: &AnalysisResult, right: &AnalysisResult) -> Ordering {
    match (left.lts.is_finite(), right.lts.is_finite()) {
        (true, true) => right.lts.total_cmp(&left.lts),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Stable descending sort by composite score; ties keep input order.
pub fn rank(results: Vec<AnalysisResult>, config: &ScoringConfig) -> ComparisonReport {
    rank_tagged(
        results.into_iter().map(|result| (None, result)).collect(),
        config,
    )
}

pub(crate) fn rank_tagged(
    mut tagged: Vec<(Option<CompanyTag>, AnalysisResult)>,
    config: &ScoringConfig,
) -> ComparisonReport {
    tagged.sort_by(|(_, left), (_, right)| descending_lts(left, right));

    let Some(leader_scores) = tagged.first().map(|(_, leader)| leader.pillar_scores) else {
        return ComparisonReport::default();
    };

    let len = tagged.len();
    let entries = tagged
        .into_iter()
        .enumerate()
        .map(|(index, (tag, result))| {
            let standing = Standing::for_position(index, len);
            let pillar_deltas = result
                .pillar_scores
                .map(|pillar, score| score - leader_scores.get(pillar));
            let risk_probability = result.risk_estimate(config).probability;

            let (company_id, logo) = match tag {
                Some(tag) => (Some(tag.id), Some(tag.logo)),
                None => (None, None),
            };

            ComparisonEntry {
                rank: index + 1,
                company_id,
                logo,
                standing,
                standing_label: standing.label(),
                pillar_deltas,
                risk_probability,
                result,
            }
        })
        .collect();

    ComparisonReport { entries }
}
