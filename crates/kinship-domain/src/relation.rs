//! Relation kinds a respondent can declare
//!
//! Each kind maps totally to its sex, whether it needs an anchor node, and
//! the strategy used to attach it to the graph. Keywords that match no kind
//! are rejected instead of being given a default sex.

use crate::Sex;

/// Family side of an aunt or uncle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Mother's side
    Maternal,

    /// Father's side
    Paternal,
}

impl Side {
    /// Label prefix for this side
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Maternal => "maternal",
            Side::Paternal => "paternal",
        }
    }

    /// Infer the side from an anchor label ("father", "maternal grandmother")
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("maternal") {
            Some(Side::Maternal)
        } else if label.contains("paternal") {
            Some(Side::Paternal)
        } else if label.contains("mother") {
            Some(Side::Maternal)
        } else if label.contains("father") {
            Some(Side::Paternal)
        } else {
            None
        }
    }
}

/// How a new relative is wired into the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStrategy {
    /// Child of the anchor and of the anchor's ex-partner (created if absent)
    WithAnchorExPartner,

    /// Child of ego and of ego's partner (created if absent)
    WithEgoPartner,

    /// Child of every existing parent of ego
    WithEgoParents,

    /// Child of the anchor and of the anchor's partner (created if absent)
    WithAnchorPartner,

    /// Child of every existing parent of the anchor
    WithAnchorParents,
}

/// A relative kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Brother or sister of ego
    Sibling(Sex),

    /// Half brother or half sister through the anchor
    HalfSibling(Sex),

    /// Son or daughter of ego
    Child(Sex),

    /// Nephew or niece; the anchor is their parent
    NieceOrNephew(Sex),

    /// First cousin; the anchor is their parent
    FirstCousin(Sex),

    /// Grandson or granddaughter; the anchor is their parent
    Grandchild(Sex),

    /// Aunt or uncle; the anchor is the parent they are a sibling of
    AuntOrUncle {
        /// Sex of the new relative
        sex: Sex,
        /// Explicit side; inferred from the anchor label when absent
        side: Option<Side>,
    },
}

impl Relation {
    /// Parse a relation keyword
    ///
    /// Case, hyphens, underscores and spaces are ignored, so
    /// `"paternal-uncle"`, `"paternalUncle"` and `"Paternal Uncle"` are the
    /// same keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::{Relation, Sex, Side};
    ///
    /// assert_eq!(Relation::parse("halfBrother"), Some(Relation::HalfSibling(Sex::Male)));
    /// assert_eq!(
    ///     Relation::parse("paternal-aunt"),
    ///     Some(Relation::AuntOrUncle { sex: Sex::Female, side: Some(Side::Paternal) }),
    /// );
    /// assert_eq!(Relation::parse("cousin"), None);
    /// ```
    pub fn parse(keyword: &str) -> Option<Self> {
        let normalized: String = keyword
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let relation = match normalized.as_str() {
            "brother" => Relation::Sibling(Sex::Male),
            "sister" => Relation::Sibling(Sex::Female),
            "halfbrother" => Relation::HalfSibling(Sex::Male),
            "halfsister" => Relation::HalfSibling(Sex::Female),
            "son" => Relation::Child(Sex::Male),
            "daughter" => Relation::Child(Sex::Female),
            "nephew" => Relation::NieceOrNephew(Sex::Male),
            "niece" => Relation::NieceOrNephew(Sex::Female),
            "firstcousinmale" | "cousinmale" | "malecousin" => Relation::FirstCousin(Sex::Male),
            "firstcousinfemale" | "cousinfemale" | "femalecousin" => {
                Relation::FirstCousin(Sex::Female)
            }
            "grandson" => Relation::Grandchild(Sex::Male),
            "granddaughter" => Relation::Grandchild(Sex::Female),
            "uncle" => Relation::AuntOrUncle { sex: Sex::Male, side: None },
            "aunt" => Relation::AuntOrUncle { sex: Sex::Female, side: None },
            "maternaluncle" => Relation::AuntOrUncle {
                sex: Sex::Male,
                side: Some(Side::Maternal),
            },
            "maternalaunt" => Relation::AuntOrUncle {
                sex: Sex::Female,
                side: Some(Side::Maternal),
            },
            "paternaluncle" => Relation::AuntOrUncle {
                sex: Sex::Male,
                side: Some(Side::Paternal),
            },
            "paternalaunt" => Relation::AuntOrUncle {
                sex: Sex::Female,
                side: Some(Side::Paternal),
            },
            _ => return None,
        };

        Some(relation)
    }

    /// Sex of the new relative
    pub fn sex(&self) -> Sex {
        match *self {
            Relation::Sibling(sex)
            | Relation::HalfSibling(sex)
            | Relation::Child(sex)
            | Relation::NieceOrNephew(sex)
            | Relation::FirstCousin(sex)
            | Relation::Grandchild(sex)
            | Relation::AuntOrUncle { sex, .. } => sex,
        }
    }

    /// Whether the relation is positioned relative to an anchor node
    pub fn requires_anchor(&self) -> bool {
        !matches!(self, Relation::Sibling(_) | Relation::Child(_))
    }

    /// How the new node is attached to the graph
    pub fn strategy(&self) -> ConnectionStrategy {
        match self {
            Relation::HalfSibling(_) => ConnectionStrategy::WithAnchorExPartner,
            Relation::Child(_) => ConnectionStrategy::WithEgoPartner,
            Relation::Sibling(_) => ConnectionStrategy::WithEgoParents,
            Relation::NieceOrNephew(_) | Relation::FirstCousin(_) | Relation::Grandchild(_) => {
                ConnectionStrategy::WithAnchorPartner
            }
            Relation::AuntOrUncle { .. } => ConnectionStrategy::WithAnchorParents,
        }
    }

    /// Canonical camelCase keyword
    pub fn keyword(&self) -> &'static str {
        use Sex::{Female, Male};

        match *self {
            Relation::Sibling(Male) => "brother",
            Relation::Sibling(Female) => "sister",
            Relation::HalfSibling(Male) => "halfBrother",
            Relation::HalfSibling(Female) => "halfSister",
            Relation::Child(Male) => "son",
            Relation::Child(Female) => "daughter",
            Relation::NieceOrNephew(Male) => "nephew",
            Relation::NieceOrNephew(Female) => "niece",
            Relation::FirstCousin(Male) => "firstCousinMale",
            Relation::FirstCousin(Female) => "firstCousinFemale",
            Relation::Grandchild(Male) => "grandson",
            Relation::Grandchild(Female) => "granddaughter",
            Relation::AuntOrUncle { sex: Male, .. } => "uncle",
            Relation::AuntOrUncle { sex: Female, .. } => "aunt",
        }
    }

    /// Display label for the new node
    ///
    /// The keyword is split on camelCase boundaries and lower-cased. Aunts
    /// and uncles get a `maternal`/`paternal` prefix, taken from the explicit
    /// side or else from the anchor's label.
    pub fn label(&self, anchor_label: Option<&str>) -> String {
        let base = spaced_lowercase(self.keyword());

        match self {
            Relation::AuntOrUncle { side, .. } => {
                match side.or_else(|| anchor_label.and_then(Side::from_label)) {
                    Some(side) => format!("{} {}", side.as_str(), base),
                    None => base,
                }
            }
            _ => base,
        }
    }
}

impl std::str::FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown relation: {}", s))
    }
}

/// "firstCousinMale" -> "first cousin male"
fn spaced_lowercase(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len() + 4);
    for c in keyword.chars() {
        if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(Relation::parse("brother"), Some(Relation::Sibling(Sex::Male)));
        assert_eq!(Relation::parse("Half_Sister"), Some(Relation::HalfSibling(Sex::Female)));
        assert_eq!(Relation::parse("firstCousinMale"), Some(Relation::FirstCousin(Sex::Male)));
        assert_eq!(Relation::parse("granddaughter"), Some(Relation::Grandchild(Sex::Female)));
        assert_eq!(
            Relation::parse("maternal uncle"),
            Some(Relation::AuntOrUncle { sex: Sex::Male, side: Some(Side::Maternal) })
        );
    }

    #[test]
    fn test_unknown_keywords_are_rejected() {
        assert_eq!(Relation::parse("stepsister"), None);
        assert_eq!(Relation::parse(""), None);
        assert!("friend".parse::<Relation>().is_err());
    }

    #[test]
    fn test_anchor_requirements() {
        assert!(!Relation::Sibling(Sex::Male).requires_anchor());
        assert!(!Relation::Child(Sex::Female).requires_anchor());
        assert!(Relation::HalfSibling(Sex::Male).requires_anchor());
        assert!(Relation::Grandchild(Sex::Male).requires_anchor());
        assert!(Relation::AuntOrUncle { sex: Sex::Female, side: None }.requires_anchor());
    }

    #[test]
    fn test_strategies() {
        assert_eq!(
            Relation::HalfSibling(Sex::Female).strategy(),
            ConnectionStrategy::WithAnchorExPartner
        );
        assert_eq!(Relation::Child(Sex::Male).strategy(), ConnectionStrategy::WithEgoPartner);
        assert_eq!(Relation::Sibling(Sex::Male).strategy(), ConnectionStrategy::WithEgoParents);
        assert_eq!(
            Relation::FirstCousin(Sex::Male).strategy(),
            ConnectionStrategy::WithAnchorPartner
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(Relation::HalfSibling(Sex::Male).label(None), "half brother");
        assert_eq!(Relation::FirstCousin(Sex::Female).label(None), "first cousin female");
        assert_eq!(Relation::Child(Sex::Female).label(Some("You")), "daughter");

        let aunt = Relation::AuntOrUncle { sex: Sex::Female, side: None };
        assert_eq!(aunt.label(Some("father")), "paternal aunt");
        assert_eq!(aunt.label(Some("mother")), "maternal aunt");
        assert_eq!(aunt.label(Some("neighbour")), "aunt");
        assert_eq!(aunt.label(None), "aunt");

        let sided = Relation::AuntOrUncle { sex: Sex::Male, side: Some(Side::Maternal) };
        assert_eq!(sided.label(Some("father")), "maternal uncle");
    }

    #[test]
    fn test_side_from_label() {
        assert_eq!(Side::from_label("maternal grandfather"), Some(Side::Maternal));
        assert_eq!(Side::from_label("Father"), Some(Side::Paternal));
        assert_eq!(Side::from_label("brother"), None);
    }
}
