use serde::{Deserialize, Serialize};
use crate::error::{Result, SplitError};

/// Largest `max_depth` a configuration may ask for (2^20 leaves)
pub const MAX_SPLIT_DEPTH: u32 = 20;

/// Parameters controlling split layout, timing and appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    /// Final separation between the two children of the root split
    pub dx: f64,
    /// Animation frames per split
    pub steps: u32,
    /// Radius shared by every disc
    pub radius: f64,
    /// Separation multiplier per generation (1.0 = constant dx).
    /// Above 0.5 sibling subtrees overlap horizontally, so x order no
    /// longer matches path order.
    pub spread_decay: f64,
    /// Text drawn on every disc
    pub label: String,
    /// Vertical distance from a disc's center down to its label
    pub label_offset: f64,
    pub fill: String,
    pub stroke: String,
    /// Fill for leaves where the highlighted proposition holds
    pub highlight_fill: String,
    /// Fill for leaves where the highlighted proposition fails
    pub dimmed_fill: String,
    pub font: String,
    pub text_fill: String,
    /// Upper bound applied to requested split depth
    pub max_depth: u32,
    /// Proposition names, generated as B1..Bn where missing
    pub propositions: Vec<String>,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            dx: 60.0,
            steps: 60,
            radius: 20.0,
            spread_decay: 0.5,          // Bisect the spread each generation
            label: "W".to_string(),
            label_offset: 5.0,
            fill: "lightblue".to_string(),
            stroke: "darkblue".to_string(),
            highlight_fill: "gold".to_string(),
            dimmed_fill: "lightgray".to_string(),
            font: "14px sans-serif".to_string(),
            text_fill: "black".to_string(),
            max_depth: 12,
            propositions: Vec::new(),
        }
    }
}

impl SplitParams {
    /// Parse from YAML string. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let params: SplitParams = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(SplitError::invalid_params("steps must be at least 1"));
        }
        if !self.dx.is_finite() || self.dx <= 0.0 {
            return Err(SplitError::invalid_params(format!("dx must be positive, got {}", self.dx)));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SplitError::invalid_params(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.spread_decay > 0.0 && self.spread_decay <= 1.0) {
            return Err(SplitError::invalid_params(format!(
                "spread_decay must be in (0, 1], got {}",
                self.spread_decay
            )));
        }
        if self.max_depth > MAX_SPLIT_DEPTH {
            return Err(SplitError::invalid_params(format!(
                "max_depth must be at most {}, got {}",
                MAX_SPLIT_DEPTH, self.max_depth
            )));
        }
        Ok(())
    }

    /// Horizontal distance each child travels when a disc of `generation` splits
    pub fn half_spread(&self, generation: usize) -> f64 {
        self.dx / 2.0 * self.spread_decay.powi(generation as i32)
    }

    pub fn clamp_depth(&self, depth: u32) -> u32 {
        let max_depth = self.max_depth.min(MAX_SPLIT_DEPTH);
        if depth > max_depth {
            tracing::warn!(depth, max_depth, "split depth clamped");
            max_depth
        } else {
            depth
        }
    }
}

/// Read a split depth from user input
///
/// Negative integers and anything that is not an integer count as 0.
/// Integers too large for `u32` saturate to `u32::MAX`.
pub fn parse_split_depth(input: &str) -> u32 {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        tracing::warn!(input, "unreadable split depth, using 0");
        return 0;
    }
    if negative {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}
