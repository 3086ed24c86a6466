//! Value types shared by the API modules and their callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of colours Trello accepts for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Yellow,
    Purple,
    Blue,
    Red,
    Green,
    Orange,
    Black,
    Sky,
    Pink,
    Lime,
}

impl LabelColor {
    pub const ALL: [LabelColor; 10] = [
        LabelColor::Yellow,
        LabelColor::Purple,
        LabelColor::Blue,
        LabelColor::Red,
        LabelColor::Green,
        LabelColor::Orange,
        LabelColor::Black,
        LabelColor::Sky,
        LabelColor::Pink,
        LabelColor::Lime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelColor::Yellow => "yellow",
            LabelColor::Purple => "purple",
            LabelColor::Blue => "blue",
            LabelColor::Red => "red",
            LabelColor::Green => "green",
            LabelColor::Orange => "orange",
            LabelColor::Black => "black",
            LabelColor::Sky => "sky",
            LabelColor::Pink => "pink",
            LabelColor::Lime => "lime",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position keyword used when none is given.
pub const DEFAULT_POSITION: &str = "bottom";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_color_serde_matches_as_str() {
        for color in LabelColor::ALL {
            let encoded = serde_json::to_value(color).unwrap();
            assert_eq!(encoded, serde_json::Value::String(color.as_str().to_string()));
        }
    }

    #[test]
    fn test_unknown_color_rejected() {
        let result: Result<LabelColor, _> = serde_json::from_str("\"magenta\"");
        assert!(result.is_err());
        let result: Result<LabelColor, _> = serde_json::from_str("\"Red\"");
        assert!(result.is_err());
    }
}
