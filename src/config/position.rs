// SPDX-License-Identifier: MPL-2.0
//! Screen positions and edge offsets for toast containers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a container is pinned on screen.
///
/// Names follow the `top-right` style used in configuration files. An
/// unrecognized name parses to [`Position::Unplaced`], whose container
/// receives no placement rules at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
    Center,
    #[serde(other)]
    Unplaced,
}

impl Position {
    /// Every position that maps to a placement rule.
    pub const ALL: [Position; 7] = [
        Position::TopLeft,
        Position::TopRight,
        Position::TopCenter,
        Position::BottomLeft,
        Position::BottomRight,
        Position::BottomCenter,
        Position::Center,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::TopCenter => "top-center",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::BottomCenter => "bottom-center",
            Position::Center => "center",
            Position::Unplaced => "unplaced",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .unwrap_or_else(|| {
                tracing::warn!(position = s, "unknown toast position, container will be unplaced");
                Position::Unplaced
            });
        Ok(position)
    }
}

/// Container distance from each screen edge, in pixels.
///
/// Values are emitted as-is; negative offsets are not rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offsets {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_name() {
        for position in Position::ALL {
            assert_eq!(position.as_str().parse::<Position>(), Ok(position));
        }
    }

    #[test]
    fn unknown_name_is_unplaced() {
        assert_eq!("middle-ish".parse::<Position>(), Ok(Position::Unplaced));
    }

    #[test]
    fn default_is_top_right() {
        assert_eq!(Position::default(), Position::TopRight);
    }

    #[test]
    fn deserializes_kebab_case_and_unknown_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            position: Position,
        }

        let known: Wrapper = toml::from_str(r#"position = "bottom-center""#).unwrap();
        assert_eq!(known.position, Position::BottomCenter);

        let unknown: Wrapper = toml::from_str(r#"position = "sideways""#).unwrap();
        assert_eq!(unknown.position, Position::Unplaced);
    }
}
