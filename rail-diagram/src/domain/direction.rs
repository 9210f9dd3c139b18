//! Travel directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of travel along a railway.
///
/// Down runs in station-sequence order, up runs against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    /// Returns true for [`Direction::Down`].
    pub fn is_down(self) -> bool {
        self == Direction::Down
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => f.pad("down"),
            Direction::Up => f.pad("up"),
        }
    }
}

/// Which direction(s) of the line actually pass through a station.
///
/// Persisted as an integer code: 0 not-via, 1 down, 2 up, 3 both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PassedDirection {
    NotVia,
    DownVia,
    UpVia,
    #[default]
    BothVia,
}

impl PassedDirection {
    /// Returns true if down-direction trains pass this station.
    pub fn is_down_via(self) -> bool {
        matches!(self, PassedDirection::DownVia | PassedDirection::BothVia)
    }

    /// Returns true if up-direction trains pass this station.
    pub fn is_up_via(self) -> bool {
        matches!(self, PassedDirection::UpVia | PassedDirection::BothVia)
    }

    /// Returns true if trains travelling in `dir` pass this station.
    pub fn is_via(self, dir: Direction) -> bool {
        match dir {
            Direction::Down => self.is_down_via(),
            Direction::Up => self.is_up_via(),
        }
    }

    /// The tag seen after the railway is reversed: down and up swap.
    pub fn reversed(self) -> Self {
        match self {
            PassedDirection::DownVia => PassedDirection::UpVia,
            PassedDirection::UpVia => PassedDirection::DownVia,
            other => other,
        }
    }
}

impl fmt::Display for PassedDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            PassedDirection::NotVia => "none",
            PassedDirection::DownVia => "down",
            PassedDirection::UpVia => "up",
            PassedDirection::BothVia => "both",
        })
    }
}

/// Error returned for an unknown pass-direction code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid pass-direction code: {0}")]
pub struct InvalidPassedDirection(u8);

impl TryFrom<u8> for PassedDirection {
    type Error = InvalidPassedDirection;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PassedDirection::NotVia),
            1 => Ok(PassedDirection::DownVia),
            2 => Ok(PassedDirection::UpVia),
            3 => Ok(PassedDirection::BothVia),
            other => Err(InvalidPassedDirection(other)),
        }
    }
}

impl From<PassedDirection> for u8 {
    fn from(dir: PassedDirection) -> Self {
        match dir {
            PassedDirection::NotVia => 0,
            PassedDirection::DownVia => 1,
            PassedDirection::UpVia => 2,
            PassedDirection::BothVia => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn via_flags() {
        assert!(PassedDirection::BothVia.is_down_via());
        assert!(PassedDirection::BothVia.is_up_via());
        assert!(PassedDirection::DownVia.is_via(Direction::Down));
        assert!(!PassedDirection::DownVia.is_via(Direction::Up));
        assert!(PassedDirection::UpVia.is_via(Direction::Up));
        assert!(!PassedDirection::NotVia.is_via(Direction::Down));
        assert!(!PassedDirection::NotVia.is_via(Direction::Up));
    }

    #[test]
    fn reversed_swaps_single_direction_tags() {
        assert_eq!(PassedDirection::DownVia.reversed(), PassedDirection::UpVia);
        assert_eq!(PassedDirection::UpVia.reversed(), PassedDirection::DownVia);
        assert_eq!(PassedDirection::BothVia.reversed(), PassedDirection::BothVia);
        assert_eq!(PassedDirection::NotVia.reversed(), PassedDirection::NotVia);
    }

    #[test]
    fn codes() {
        for code in 0u8..4 {
            let dir = PassedDirection::try_from(code).unwrap();
            assert_eq!(u8::from(dir), code);
        }
        assert!(PassedDirection::try_from(4).is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&PassedDirection::UpVia).unwrap();
        assert_eq!(json, "2");
        let dir: PassedDirection = serde_json::from_str("1").unwrap();
        assert_eq!(dir, PassedDirection::DownVia);
        assert!(serde_json::from_str::<PassedDirection>("9").is_err());
    }

    #[test]
    fn direction_reverse() {
        assert_eq!(Direction::Down.reverse(), Direction::Up);
        assert_eq!(Direction::Up.reverse().reverse(), Direction::Up);
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn display_pads() {
        assert_eq!(format!("{:<5}|", PassedDirection::UpVia), "up   |");
        assert_eq!(PassedDirection::NotVia.to_string(), "none");
        assert_eq!(format!("{:>4}", Direction::Up), "  up");
    }
}
