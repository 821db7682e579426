//! Interview scripts: census counts plus relatives added one by one.
//!
//! ```toml
//! sex = "male"
//!
//! [census]
//! brothers = 1
//! paternalAunts = 2
//!
//! [[relatives]]
//! relation = "halfBrother"
//! anchor = "father"
//!
//! [[relatives]]
//! relation = "firstCousinFemale"
//! anchor = "paternal aunt"
//! ```
//!
//! Anchors are node labels; the first node with that label, in insertion
//! order, is used.

use crate::error::{CliError, Result};
use kinship_domain::{NodeId, Sex};
use kinship_pedigree::{CensusCounts, Pedigree, Placement};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// A parsed script
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Sex of the respondent
    pub sex: String,

    /// Counts used to seed the pedigree
    #[serde(default)]
    pub census: CensusCounts,

    /// Relatives added after seeding, in order
    #[serde(default)]
    pub relatives: Vec<RelativeStep>,
}

/// One relative addition
#[derive(Debug, Clone, Deserialize)]
pub struct RelativeStep {
    /// Relation keyword, such as `"halfSister"` or `"paternal-uncle"`
    pub relation: String,

    /// Label of the anchor node
    #[serde(default)]
    pub anchor: Option<String>,
}

/// What happened to one step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A node was added
    Added {
        /// The relation keyword
        relation: String,
        /// Result of inference
        placement: Placement,
    },
    /// The keyword was not recognised and nothing was added
    Skipped {
        /// The relation keyword
        relation: String,
    },
}

impl Script {
    /// Load a script from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Sex of the respondent
    pub fn ego_sex(&self) -> Result<Sex> {
        Sex::parse(&self.sex)
            .ok_or_else(|| CliError::InvalidInput(format!("unknown sex '{}'", self.sex)))
    }

    /// Seed `pedigree` and apply every step
    pub fn apply(&self, pedigree: &mut Pedigree) -> Result<Vec<StepOutcome>> {
        pedigree.generate_placeholder_network(&self.census, self.ego_sex()?)?;

        let mut outcomes = Vec::with_capacity(self.relatives.len());
        for step in &self.relatives {
            let anchor = step
                .anchor
                .as_deref()
                .map(|label| resolve_anchor(pedigree, label))
                .transpose()?;

            let outcome = match pedigree.add_placeholder_node(&step.relation, anchor)? {
                Some(placement) => StepOutcome::Added {
                    relation: step.relation.clone(),
                    placement,
                },
                None => StepOutcome::Skipped {
                    relation: step.relation.clone(),
                },
            };
            outcomes.push(outcome);
        }

        info!(
            steps = outcomes.len(),
            nodes = pedigree.graph().node_count(),
            "Script applied"
        );
        Ok(outcomes)
    }
}

fn resolve_anchor(pedigree: &Pedigree, label: &str) -> Result<NodeId> {
    pedigree
        .graph()
        .find_by_label(label)
        .map(|n| n.id)
        .ok_or_else(|| CliError::InvalidInput(format!("no node labelled '{}'", label)))
}
