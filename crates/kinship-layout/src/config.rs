//! Configuration for the layout engine
//!
//! Sizes are in abstract drawing units; the renderer decides what a unit is.

use serde::{Deserialize, Serialize};

/// Geometry used by [`LayoutEngine`](crate::LayoutEngine)
///
/// # Examples
///
/// ```
/// use kinship_layout::LayoutConfig;
///
/// let config = LayoutConfig::default();
/// assert_eq!(config.node_width, 100.0);
/// assert_eq!(config.couple_width(), 180.0);
///
/// let compact = LayoutConfig::compact();
/// assert!(compact.node_width < config.node_width);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal space reserved for a single node
    /// Default: 100
    pub node_width: f64,

    /// Vertical distance between generations
    /// Default: 120
    pub layer_height: f64,

    /// Width of a couple unit as a multiple of `node_width`
    /// Default: 1.8
    pub couple_width_factor: f64,

    /// Distance of each partner from the couple centre, as a multiple of `node_width`
    /// Default: 0.4, so partners sit one node width from anything outside the couple
    pub partner_offset_factor: f64,

    /// Left edge of the drawing: the smallest x after layout
    /// Default: 0
    pub origin_x: f64,

    /// y of generation 0
    /// Default: 0
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 100.0,
            layer_height: 120.0,
            couple_width_factor: 1.8,
            partner_offset_factor: 0.4,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Tighter geometry for small screens
    pub fn compact() -> Self {
        Self {
            node_width: 60.0,
            layer_height: 80.0,
            ..Self::default()
        }
    }

    /// Roomier geometry for print or large displays
    pub fn spacious() -> Self {
        Self {
            node_width: 140.0,
            layer_height: 180.0,
            ..Self::default()
        }
    }

    /// Width of a couple treated as one unit
    pub fn couple_width(&self) -> f64 {
        self.node_width * self.couple_width_factor
    }

    /// Offset of each partner from the couple centre
    pub fn partner_offset(&self) -> f64 {
        self.node_width * self.partner_offset_factor
    }

    /// Check that the geometry can produce a drawable layout
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("node_width", self.node_width),
            ("layer_height", self.layer_height),
            ("couple_width_factor", self.couple_width_factor),
            ("partner_offset_factor", self.partner_offset_factor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        if !self.origin_x.is_finite() || !self.origin_y.is_finite() {
            return Err("origin must be finite".to_string());
        }
        // A partner may come no closer than one node width to the unit edge
        if 2.0 * self.partner_offset_factor > self.couple_width_factor - 1.0 + 1e-9 {
            return Err(format!(
                "partner_offset_factor {} crowds neighbours of a couple_width_factor {} unit",
                self.partner_offset_factor, self.couple_width_factor
            ));
        }
        Ok(())
    }
}

/// Drawing area the finished layout is centred in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
