//! The Concept Brief data model.
//!
//! A brief is the structured creative output returned by the generation
//! service: a named promotion concept, an ordered page layout, copywriting,
//! and director-level notes for the design team.

use crate::{PromodeckError, Result};
use serde::{Deserialize, Serialize};

/// A structured creative brief for one promotion campaign.
///
/// Briefs are immutable once received. The session holds at most one brief
/// at a time, replacing any prior value wholesale on a new generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptBrief {
    /// Campaign title.
    pub promotion_name: String,

    /// Overall design concept and mood.
    pub concept_summary: String,

    /// Page or banner sections in display order.
    pub layout: Vec<LayoutSection>,

    /// Main copy, sub copy and reference keywords.
    pub copywriting: Copywriting,

    /// Free-form instructions from the creative director. May span lines.
    pub director_notes: String,
}

/// One section of the page or banner layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSection {
    /// Section label (e.g. "Hero", "Feature 1", "Reviews").
    pub section_name: String,

    /// Visual elements and arrangement the designer should produce.
    pub visual_description: String,

    /// Copy placed inside this section.
    pub copy: String,
}

/// Copywriting block of a brief.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Copywriting {
    /// The headline copy, displayed largest.
    pub main_copy: String,

    /// Supporting copy under the headline.
    pub sub_copy: String,

    /// Reference keywords, 3-5 by convention. Length is not enforced.
    pub keywords: Vec<String>,
}

impl ConceptBrief {
    /// Parse a JSON payload into a brief and check the required-field contract.
    pub fn from_json(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Err(PromodeckError::MalformedBrief("empty payload".to_string()));
        }

        let brief: ConceptBrief = serde_json::from_str(payload)
            .map_err(|e| PromodeckError::MalformedBrief(e.to_string()))?;
        brief.validate()?;
        Ok(brief)
    }

    /// Check that every required field is present and non-empty.
    ///
    /// The service is schema-constrained, but a parseable response can still
    /// arrive with empty strings or no layout sections. Such a response is
    /// rejected here instead of being displayed half-filled.
    pub fn validate(&self) -> Result<()> {
        required("promotionName", &self.promotion_name)?;
        required("conceptSummary", &self.concept_summary)?;

        if self.layout.is_empty() {
            return Err(PromodeckError::MalformedBrief(
                "layout has no sections".to_string(),
            ));
        }
        for (i, section) in self.layout.iter().enumerate() {
            required(&format!("layout[{i}].sectionName"), &section.section_name)?;
            required(
                &format!("layout[{i}].visualDescription"),
                &section.visual_description,
            )?;
            required(&format!("layout[{i}].copy"), &section.copy)?;
        }

        required("copywriting.mainCopy", &self.copywriting.main_copy)?;
        required("copywriting.subCopy", &self.copywriting.sub_copy)?;

        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PromodeckError::MalformedBrief(format!(
            "missing required field: {field}"
        )));
    }
    Ok(())
}
