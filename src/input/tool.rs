//! Drawing tool selection.

use crate::draw::{Color, CompositeMode};
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines how a stroke is composited into the buffer.
/// A change only takes effect at the next stroke start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Freehand drawing in the pen color (default)
    #[default]
    Pen,
    /// Erases existing content to transparency
    Eraser,
}

impl ToolMode {
    /// Compositing rule for a stroke drawn with this tool.
    pub fn composite_mode(self, pen_color: Color) -> CompositeMode {
        match self {
            ToolMode::Pen => CompositeMode::SourceOver(pen_color),
            ToolMode::Eraser => CompositeMode::DestinationOut,
        }
    }

    /// Human-readable name used in logs and status displays.
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Pen => "pen",
            ToolMode::Eraser => "eraser",
        }
    }
}

impl std::str::FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pen" => Ok(ToolMode::Pen),
            "eraser" => Ok(ToolMode::Eraser),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    #[test]
    fn composite_modes_follow_tool() {
        assert_eq!(
            ToolMode::Pen.composite_mode(RED),
            CompositeMode::SourceOver(RED)
        );
        assert_eq!(
            ToolMode::Eraser.composite_mode(RED),
            CompositeMode::DestinationOut
        );
    }

    #[test]
    fn parses_tool_names() {
        assert_eq!("Eraser".parse::<ToolMode>(), Ok(ToolMode::Eraser));
        assert!("brush".parse::<ToolMode>().is_err());
    }
}
