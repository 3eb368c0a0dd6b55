//! User profile: the normalized input to the recommendation engine.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on submitted skills or interests, counted before normalization.
pub const MAX_TERMS: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("skills: at least one non-empty skill is required")]
    EmptySkills,

    #[error("interests: at least one non-empty interest is required")]
    EmptyInterests,

    #[error("{field}: at most {max} entries are allowed, got {count}")]
    TooManyTerms {
        field: &'static str,
        max: usize,
        count: usize,
    },

    #[error("career_mode: expected 'growth' or 'stability', got '{0}'")]
    UnknownCareerMode(String),

    #[error("risk_preference: expected 'low', 'medium' or 'high', got '{0}'")]
    UnknownRiskPreference(String),
}

/// Whether the user favours growth-oriented or stability-oriented careers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerMode {
    Growth,
    Stability,
}

impl CareerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerMode::Growth => "growth",
            CareerMode::Stability => "stability",
        }
    }
}

impl FromStr for CareerMode {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "growth" => Ok(CareerMode::Growth),
            "stability" => Ok(CareerMode::Stability),
            _ => Err(ProfileError::UnknownCareerMode(s.to_string())),
        }
    }
}

impl fmt::Display for CareerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's tolerance for career volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPreference {
    Low,
    Medium,
    High,
}

impl RiskPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskPreference::Low => "low",
            RiskPreference::Medium => "medium",
            RiskPreference::High => "high",
        }
    }

    /// Position on the same 0–10 scale as `CareerProfile::risk_level`.
    pub fn level(&self) -> f64 {
        match self {
            RiskPreference::Low => 2.5,
            RiskPreference::Medium => 5.0,
            RiskPreference::High => 7.5,
        }
    }
}

impl FromStr for RiskPreference {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskPreference::Low),
            "medium" => Ok(RiskPreference::Medium),
            "high" => Ok(RiskPreference::High),
            _ => Err(ProfileError::UnknownRiskPreference(s.to_string())),
        }
    }
}

impl fmt::Display for RiskPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, normalized user profile.
///
/// Skills and interests are lowercase, trimmed, non-empty and deduplicated,
/// in the order the user supplied them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    skills: Vec<String>,
    interests: Vec<String>,
    career_mode: CareerMode,
    risk_preference: RiskPreference,
}

impl UserProfile {
    pub fn new(
        skills: &[String],
        interests: &[String],
        career_mode: CareerMode,
        risk_preference: RiskPreference,
    ) -> Result<Self, ProfileError> {
        check_term_count("skills", skills)?;
        check_term_count("interests", interests)?;
        let skills = normalize_terms(skills);
        if skills.is_empty() {
            return Err(ProfileError::EmptySkills);
        }
        let interests = normalize_terms(interests);
        if interests.is_empty() {
            return Err(ProfileError::EmptyInterests);
        }
        Ok(Self {
            skills,
            interests,
            career_mode,
            risk_preference,
        })
    }

    /// Builds a profile from raw request strings, validating the enum fields.
    pub fn parse(
        skills: &[String],
        interests: &[String],
        career_mode: &str,
        risk_preference: &str,
    ) -> Result<Self, ProfileError> {
        let career_mode = career_mode.parse()?;
        let risk_preference = risk_preference.parse()?;
        Self::new(skills, interests, career_mode, risk_preference)
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn career_mode(&self) -> CareerMode {
        self.career_mode
    }

    pub fn risk_preference(&self) -> RiskPreference {
        self.risk_preference
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }
}

fn check_term_count(field: &'static str, raw: &[String]) -> Result<(), ProfileError> {
    if raw.len() > MAX_TERMS {
        return Err(ProfileError::TooManyTerms {
            field,
            max: MAX_TERMS,
            count: raw.len(),
        });
    }
    Ok(())
}

/// Lowercases and trims each term, dropping empties and later duplicates.
pub fn normalize_terms(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}
