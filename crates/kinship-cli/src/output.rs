//! Output formatting for the CLI.

use crate::error::Result;
use crate::script::StepOutcome;
use colored::*;
use kinship_domain::{Node, PedigreeView, Relation};
use kinship_pedigree::{Pedigree, Placement};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON snapshot
    Json,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format every node of the pedigree with its layout position.
    pub fn format_pedigree(&self, pedigree: &Pedigree) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(pedigree.snapshot().to_json()?),
            OutputFormat::Table => Ok(self.format_pedigree_table(pedigree)),
        }
    }

    /// Nodes sorted by generation, then left to right.
    fn format_pedigree_table(&self, pedigree: &Pedigree) -> String {
        let layout = pedigree.layout();
        let mut nodes: Vec<&Node> = pedigree.nodes();
        if nodes.is_empty() {
            return self.colorize("Pedigree is empty.", "yellow");
        }
        nodes.sort_by(|a, b| {
            let key = |n: &Node| (layout.layer(n.id), n.position.map_or(0.0, |p| p.x));
            let (la, xa) = key(a);
            let (lb, xb) = key(b);
            la.cmp(&lb).then(xa.total_cmp(&xb))
        });

        let mut builder = Builder::default();
        builder.push_record(["ID", "Label", "Sex", "Layer", "X", "Y", "Flags"]);

        for node in nodes {
            let (x, y) = match node.position {
                Some(p) => (format!("{:.1}", p.x), format!("{:.1}", p.y)),
                None => ("-".to_string(), "-".to_string()),
            };
            let layer = layout
                .layer(node.id)
                .map_or_else(|| "-".to_string(), |l| l.to_string());
            builder.push_record([
                short(&node.id),
                node.label.clone(),
                node.sex.as_str().to_string(),
                layer,
                x,
                y,
                flags(node),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One line per script step.
    pub fn format_outcomes(&self, outcomes: &[StepOutcome]) -> String {
        outcomes
            .iter()
            .map(|outcome| match outcome {
                StepOutcome::Added {
                    relation,
                    placement: Placement::Connected { node, edges, .. },
                } => self.success(&format!(
                    "{} added as {} ({} edge(s))",
                    relation,
                    short(node),
                    edges.len()
                )),
                StepOutcome::Added {
                    relation,
                    placement: Placement::Detached { node, reason },
                } => self.warning(&format!(
                    "{} added as {} but not connected: {}",
                    relation,
                    short(node),
                    reason
                )),
                StepOutcome::Skipped { relation } => {
                    self.warning(&format!("{} is not a known relation, skipped", relation))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Table of supported relation keywords.
    pub fn format_relations(&self, relations: &[Relation]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Keyword", "Sex", "Anchor", "Label"]);

        for relation in relations {
            let anchor = if relation.requires_anchor() { "required" } else { "-" };
            builder.push_record([
                relation.keyword().to_string(),
                relation.sex().as_str().to_string(),
                anchor.to_string(),
                relation.label(None),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether output is machine-readable.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Random tail of the id; UUIDv7 prefixes repeat within a millisecond
fn short(id: &kinship_domain::NodeId) -> String {
    let full = id.to_string();
    full[full.len() - 8..].to_string()
}

fn flags(node: &Node) -> String {
    let mut flags = Vec::new();
    if node.is_ego {
        flags.push("ego");
    }
    if node.read_only {
        flags.push("locked");
    }
    if node.interview_network_id.is_some() {
        flags.push("linked");
    }
    flags.join(",")
}
