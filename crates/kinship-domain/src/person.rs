//! Person module - the nodes of a pedigree

use crate::NodeId;

/// Biological sex of a pedigree member
///
/// Drives couple placement (female on the left) and maternal/paternal side
/// detection in the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male
    Male,

    /// Female
    Female,
}

impl Sex {
    /// Get the sex name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse a sex from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }

    /// The opposite sex, used for synthesized partners
    pub fn opposite(&self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sex: {}", s))
    }
}

/// A computed chart position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate of the node centre
    pub x: f64,

    /// Vertical coordinate of the node centre
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A person placeholder in the pedigree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Insertion sequence assigned by the store
    ///
    /// Every order-sensitive decision in the layout engine breaks ties on
    /// this value, never on map iteration order.
    pub seq: u64,

    /// Display/relation label ("mother", "paternal uncle", "You")
    pub label: String,

    /// Sex of the person
    pub sex: Sex,

    /// True for the respondent
    pub is_ego: bool,

    /// Structurally load-bearing nodes may not be removed or re-identified
    pub read_only: bool,

    /// Back-reference to a committed entity in the interview network
    pub interview_network_id: Option<String>,

    /// Layout output; `None` until the layout engine has run
    pub position: Option<Point>,
}

/// Labels of the parent scaffold nodes that are never implicitly unlocked
const PINNED_LABELS: [&str; 2] = ["mother", "father"];

impl Node {
    /// Whether this node is the mother/father scaffold created by seeding
    pub fn is_pinned_scaffold(&self) -> bool {
        PINNED_LABELS.contains(&self.label.as_str())
    }

    /// Whether this node is still a pure layout placeholder
    pub fn is_placeholder(&self) -> bool {
        self.interview_network_id.is_none()
    }
}

/// Partial node description accepted by `add_node`
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    /// Caller-supplied id; generated when absent
    pub id: Option<NodeId>,

    /// Display label
    pub label: String,

    /// Sex of the person
    pub sex: Sex,

    /// Mark as the ego node
    pub is_ego: bool,

    /// Create locked
    pub read_only: bool,

    /// Link to a committed interview network entity
    pub interview_network_id: Option<String>,
}

impl NewNode {
    /// Describe an unlocked, non-ego placeholder
    pub fn new(label: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: None,
            label: label.into(),
            sex,
            is_ego: false,
            read_only: false,
            interview_network_id: None,
        }
    }

    /// Use a specific id
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Mark as the ego node
    pub fn ego(mut self) -> Self {
        self.is_ego = true;
        self
    }

    /// Create the node locked
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Link the node to an interview network entity
    pub fn linked_to(mut self, interview_network_id: impl Into<String>) -> Self {
        self.interview_network_id = Some(interview_network_id.into());
        self
    }
}

/// Field patch accepted by `update_node`
///
/// `label` and `sex` are identity fields and are refused on read-only nodes;
/// the lock flag and the interview link can always be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    /// New label
    pub label: Option<String>,

    /// New sex
    pub sex: Option<Sex>,

    /// Explicit lock/unlock
    pub read_only: Option<bool>,

    /// Set (`Some(Some(..))`) or clear (`Some(None)`) the interview link
    pub interview_network_id: Option<Option<String>>,
}

impl NodePatch {
    /// Whether the patch touches identity fields
    pub fn changes_identity(&self) -> bool {
        self.label.is_some() || self.sex.is_some()
    }
}
