use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::catalog::CareerProfile;
use crate::engine::profile::{CareerMode, UserProfile};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
#[error("invalid scoring weights: {0}")]
pub struct WeightsError(String);

/// Fixed weights combining the five component scores into `match_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub interest: f64,
    pub mode: f64,
    pub market: f64,
    pub risk: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.2,
            interest: 0.2,
            mode: 0.2,
            market: 0.2,
            risk: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.interest + self.mode + self.market + self.risk
    }

    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let all = [self.skill, self.interest, self.mode, self.market, self.risk];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(WeightsError(format!("negative or non-finite weight in {all:?}")));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError(format!("weights sum to {sum}, expected 1.0")));
        }
        Ok(())
    }
}

/// Per-component scores on a 0–100 scale, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub interest_score: f64,
    pub growth_or_stability_score: f64,
    pub market_score: f64,
    pub risk_alignment_score: f64,
}

impl ScoreBreakdown {
    /// Scores one career against one profile.
    pub fn compute(profile: &UserProfile, career: &CareerProfile) -> Self {
        let skill = overlap_score(&career.required_skills, |s| profile.has_skill(s));
        let interest = overlap_score(&career.related_interests, |i| profile.has_interest(i));
        let bias = match profile.career_mode() {
            CareerMode::Growth => career.growth_bias,
            CareerMode::Stability => career.stability_bias,
        };

        Self {
            skill_score: round2(skill),
            interest_score: round2(interest),
            growth_or_stability_score: round2(scale_to_percent(bias)),
            market_score: round2(scale_to_percent(career.market_demand)),
            risk_alignment_score: round2(compute_risk_alignment(
                profile.risk_preference().level(),
                career.risk_level,
            )),
        }
    }

    /// Weighted aggregate of the five components, rounded to 2 decimals.
    pub fn match_score(&self, weights: &ScoringWeights) -> f64 {
        let total = weights.skill * self.skill_score
            + weights.interest * self.interest_score
            + weights.mode * self.growth_or_stability_score
            + weights.market * self.market_score
            + weights.risk * self.risk_alignment_score;
        round2(total.clamp(0.0, 100.0))
    }
}

/// Share of `required` terms the user has, as a percentage. Empty → 0.
fn overlap_score(required: &[String], has: impl Fn(&str) -> bool) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    let hits = required.iter().filter(|term| has(term)).count();
    (hits as f64 / required.len() as f64 * 100.0).clamp(0.0, 100.0)
}

/// Maps a 0–10 figure onto 0–100.
fn scale_to_percent(value: f64) -> f64 {
    (value * 10.0).clamp(0.0, 100.0)
}

/// 100 when preference and career risk coincide, falling linearly to 0 at
/// the full width of the 0–10 scale.
pub fn compute_risk_alignment(preference_level: f64, career_risk: f64) -> f64 {
    let distance = (preference_level - career_risk).abs();
    ((1.0 - distance / 10.0) * 100.0).clamp(0.0, 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
