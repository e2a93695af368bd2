//! Render configuration.

use serde::{Deserialize, Serialize};

/// Marker used for bulleted lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStyle {
    /// Bulleted lists use `* `, enumerated lists `1. `.
    #[default]
    Bullet,
    /// Every list uses `1. `.
    Ordered,
}

/// Delimiter for fenced literal blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FenceStyle {
    #[default]
    Backtick,
    Tilde,
}

impl FenceStyle {
    pub fn fence(self) -> &'static str {
        match self {
            FenceStyle::Backtick => "```",
            FenceStyle::Tilde => "~~~",
        }
    }
}

/// Lifetime of the set of node kinds already warned about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarnScope {
    /// Warn once per renderer, across every document it renders.
    #[default]
    Instance,
    /// Warn once per document.
    Render,
}

/// Configuration for the Markdown and notebook renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenderConfig {
    pub marker_style: MarkerStyle,
    /// Largest number of `#` in a section heading.
    pub max_heading_weight: u8,
    pub fence_style: FenceStyle,
    pub warn_scope: WarnScope,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            marker_style: MarkerStyle::default(),
            max_heading_weight: 6,
            fence_style: FenceStyle::default(),
            warn_scope: WarnScope::default(),
        }
    }
}

impl RenderConfig {
    /// Heading marker for a section nested `depth` levels deep (depth ≥ 1).
    pub fn heading_marker(&self, depth: usize) -> String {
        let max = usize::from(self.max_heading_weight.max(1));
        "#".repeat((depth + 1).min(max))
    }

    /// Marker for items of a list.
    pub fn list_marker(&self, enumerated: bool) -> &'static str {
        if enumerated || self.marker_style == MarkerStyle::Ordered {
            "1. "
        } else {
            "* "
        }
    }
}
