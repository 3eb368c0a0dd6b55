//! Career catalog: static reference data the engine scores against.
//!
//! The bundled catalog is compiled into the binary; `CAREER_CATALOG_PATH`
//! swaps it for a file on disk at startup. Either source goes through the same
//! normalization and validation before the engine sees it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::profile::normalize_terms;

const BUNDLED_CATALOG: &str = include_str!("../../data/careers.json");

/// Upper bound of the 0–10 scale used by demand, risk and bias figures.
const SCALE_MAX: f64 = 10.0;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog must contain at least 2 careers, found {0}")]
    TooFewCareers(usize),

    #[error("career #{0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate career name '{0}'")]
    DuplicateName(String),

    #[error("career '{0}' has no required skills")]
    NoRequiredSkills(String),

    #[error("career '{career}': {field} = {value} is outside [0, 10]")]
    OutOfRange {
        career: String,
        field: &'static str,
        value: f64,
    },

    #[error("career '{0}' has a negative average salary")]
    NegativeSalary(String),
}

/// How hard a missing skill is to pick up and how long it usually takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub difficulty_level: String,
    pub estimated_timeline: String,
    #[serde(default)]
    pub recommended_focus: Option<String>,
}

/// Ordered phase label → ordered tasks. Key order is the phase order.
pub type Roadmap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub core_strengths: Vec<String>,
    #[serde(default)]
    pub related_interests: Vec<String>,
    pub average_salary_lpa: f64,
    pub market_demand: f64,
    pub risk_level: f64,
    pub growth_bias: f64,
    pub stability_bias: f64,
    #[serde(default)]
    pub future_scope: Option<String>,
    #[serde(default)]
    pub work_style: Option<String>,
    #[serde(default)]
    pub industry_trend: Option<String>,
    #[serde(default)]
    pub learning_resources: BTreeMap<String, LearningResource>,
    #[serde(default)]
    pub roadmap_template: Roadmap,
}

impl CareerProfile {
    /// Lowercases skill, interest and resource keys so they compare equal to
    /// normalized profile terms.
    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.required_skills = normalize_terms(&self.required_skills);
        self.related_interests = normalize_terms(&self.related_interests);
        self.learning_resources = std::mem::take(&mut self.learning_resources)
            .into_iter()
            .map(|(skill, resource)| (skill.trim().to_lowercase(), resource))
            .collect();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    careers: Vec<CareerProfile>,
}

impl Catalog {
    /// The catalog shipped inside the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        Self::new(catalog.careers)
    }

    pub fn new(mut careers: Vec<CareerProfile>) -> Result<Self, CatalogError> {
        careers.iter_mut().for_each(CareerProfile::normalize);
        validate(&careers)?;
        Ok(Self { careers })
    }

    pub fn careers(&self) -> &[CareerProfile] {
        &self.careers
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }
}

fn validate(careers: &[CareerProfile]) -> Result<(), CatalogError> {
    if careers.len() < 2 {
        return Err(CatalogError::TooFewCareers(careers.len()));
    }

    let mut seen = HashSet::new();
    for (idx, career) in careers.iter().enumerate() {
        if career.name.is_empty() {
            return Err(CatalogError::EmptyName(idx));
        }
        if !seen.insert(career.name.to_lowercase()) {
            return Err(CatalogError::DuplicateName(career.name.clone()));
        }
        if career.required_skills.is_empty() {
            return Err(CatalogError::NoRequiredSkills(career.name.clone()));
        }
        if career.average_salary_lpa < 0.0 {
            return Err(CatalogError::NegativeSalary(career.name.clone()));
        }

        let scaled = [
            ("market_demand", career.market_demand),
            ("risk_level", career.risk_level),
            ("growth_bias", career.growth_bias),
            ("stability_bias", career.stability_bias),
        ];
        for (field, value) in scaled {
            if !(0.0..=SCALE_MAX).contains(&value) {
                return Err(CatalogError::OutOfRange {
                    career: career.name.clone(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}
