//! Recommender: scores every catalog career against a profile and returns the
//! two best distinct careers with skill gaps, a learning plan and a roadmap.
//!
//! Pure and synchronous: the same `(profile, catalog, weights)` always yields
//! the same output, so a reopened history entry reproduces its recommendation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::catalog::{CareerProfile, Catalog, Roadmap};
use crate::engine::profile::UserProfile;
use crate::engine::scoring::{ScoreBreakdown, ScoringWeights, WeightsError};

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("No careers are available to recommend")]
    NoCareersAvailable,

    #[error("At least 2 distinct careers are required to recommend a primary and backup, found {0}")]
    InsufficientCandidates(usize),
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlanItem {
    pub skill_to_learn: String,
    pub difficulty_level: String,
    pub estimated_timeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_focus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub career: String,
    pub category: Option<String>,
    pub match_score: f64,
    pub average_salary_lpa: f64,
    pub risk_level: f64,
    pub market_demand: f64,
    pub core_strengths: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub learning_plan: Vec<LearningPlanItem>,
    pub career_roadmap: Roadmap,
    pub score_breakdown: ScoreBreakdown,
    pub future_scope: Option<String>,
    pub work_style: Option<String>,
    pub industry_trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub primary_recommendation: Recommendation,
    pub backup_recommendation: Recommendation,
}

// ────────────────────────────────────────────────────────────────────────────
// Recommender
// ────────────────────────────────────────────────────────────────────────────

/// Owns the validated catalog and weights. Shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(catalog: Catalog, weights: ScoringWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { catalog, weights })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn recommend(&self, profile: &UserProfile) -> Result<RecommendationSet, EngineError> {
        recommend(profile, self.catalog.careers(), &self.weights)
    }
}

/// A career paired with its scores, before the full record is built.
struct ScoredCareer<'a> {
    career: &'a CareerProfile,
    breakdown: ScoreBreakdown,
    match_score: f64,
}

/// Ranks `careers` for `profile` and returns the top two distinctly named careers.
///
/// Ordering: match_score desc, then market_score desc, then name asc.
pub fn recommend(
    profile: &UserProfile,
    careers: &[CareerProfile],
    weights: &ScoringWeights,
) -> Result<RecommendationSet, EngineError> {
    match careers.len() {
        0 => return Err(EngineError::NoCareersAvailable),
        1 => return Err(EngineError::InsufficientCandidates(1)),
        _ => {}
    }

    let mut scored: Vec<ScoredCareer<'_>> = careers
        .iter()
        .map(|career| {
            let breakdown = ScoreBreakdown::compute(profile, career);
            ScoredCareer {
                career,
                match_score: breakdown.match_score(weights),
                breakdown,
            }
        })
        .collect();

    scored.sort_by(rank_order);

    // Entries sharing the primary's name are the same career for the caller.
    let mut ranked = scored.into_iter();
    let Some(primary) = ranked.next() else {
        return Err(EngineError::NoCareersAvailable);
    };
    let Some(backup) = ranked.find(|c| c.career.name != primary.career.name) else {
        return Err(EngineError::InsufficientCandidates(1));
    };

    Ok(RecommendationSet {
        primary_recommendation: build_recommendation(profile, primary),
        backup_recommendation: build_recommendation(profile, backup),
    })
}

fn rank_order(a: &ScoredCareer<'_>, b: &ScoredCareer<'_>) -> Ordering {
    b.match_score
        .total_cmp(&a.match_score)
        .then_with(|| b.breakdown.market_score.total_cmp(&a.breakdown.market_score))
        .then_with(|| a.career.name.cmp(&b.career.name))
}

fn build_recommendation(profile: &UserProfile, scored: ScoredCareer<'_>) -> Recommendation {
    let career = scored.career;
    let (matched_skills, missing_skills) = split_skills(profile, career);
    let learning_plan = build_learning_plan(career, &missing_skills);

    Recommendation {
        career: career.name.clone(),
        category: career.category.clone(),
        match_score: scored.match_score,
        average_salary_lpa: career.average_salary_lpa,
        risk_level: career.risk_level,
        market_demand: career.market_demand,
        core_strengths: career.core_strengths.clone(),
        matched_skills,
        missing_skills,
        learning_plan,
        career_roadmap: career.roadmap_template.clone(),
        score_breakdown: scored.breakdown,
        future_scope: career.future_scope.clone(),
        work_style: career.work_style.clone(),
        industry_trend: career.industry_trend.clone(),
    }
}

/// Partitions required skills into (matched, missing), both in required order.
fn split_skills(profile: &UserProfile, career: &CareerProfile) -> (Vec<String>, Vec<String>) {
    career
        .required_skills
        .iter()
        .cloned()
        .partition(|skill| profile.has_skill(skill))
}

/// One entry per missing skill that has a learning resource; others are skipped.
fn build_learning_plan(career: &CareerProfile, missing_skills: &[String]) -> Vec<LearningPlanItem> {
    missing_skills
        .iter()
        .filter_map(|skill| {
            career
                .learning_resources
                .get(skill)
                .map(|resource| LearningPlanItem {
                    skill_to_learn: skill.clone(),
                    difficulty_level: resource.difficulty_level.clone(),
                    estimated_timeline: resource.estimated_timeline.clone(),
                    recommended_focus: resource.recommended_focus.clone(),
                })
        })
        .collect()
}
