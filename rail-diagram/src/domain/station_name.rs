//! Station name type.

use std::fmt;

/// Separator between the station part and the field part of a literal.
const FIELD_SEPARATOR: &str = "::";

/// Identity key of a station on a railway.
///
/// A name has a station part and an optional field part (a platform,
/// yard or other qualifier). A name without a field is *bare*. Equality
/// and hashing are exact; use [`StationName::equal_or_contains`] for the
/// relaxed relation used by general lookups.
///
/// # Examples
///
/// ```
/// use rail_diagram::domain::StationName;
///
/// let bare = StationName::from_literal("Lanzhou");
/// let west = StationName::from_literal("Lanzhou::West");
///
/// assert!(bare.is_bare());
/// assert_eq!(west.station(), "Lanzhou");
/// assert_eq!(west.field(), "West");
/// assert_eq!(west.to_literal(), "Lanzhou::West");
///
/// assert!(bare.equal_or_contains(&west));
/// assert!(!west.equal_or_contains(&bare));
/// assert_ne!(bare, west);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName {
    station: String,
    field: String,
}

impl StationName {
    /// Create a name from its two parts.
    pub fn new(station: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            field: field.into(),
        }
    }

    /// Create a bare name (no field qualifier).
    pub fn bare(station: impl Into<String>) -> Self {
        Self::new(station, String::new())
    }

    /// Parse the single-string form `station` or `station::field`.
    ///
    /// Only the first separator splits; anything after it is the field.
    pub fn from_literal(s: &str) -> Self {
        match s.split_once(FIELD_SEPARATOR) {
            Some((station, field)) => Self::new(station, field),
            None => Self::bare(s),
        }
    }

    /// The single-string form, inverse of [`StationName::from_literal`].
    pub fn to_literal(&self) -> String {
        if self.is_bare() {
            self.station.clone()
        } else {
            format!("{}{}{}", self.station, FIELD_SEPARATOR, self.field)
        }
    }

    /// The station part.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// The field part (empty for bare names).
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns true if the name has no field qualifier.
    pub fn is_bare(&self) -> bool {
        self.field.is_empty()
    }

    /// Returns true if `self` names the same place as `other`, or is the
    /// bare form of the station `other` qualifies.
    pub fn equal_or_contains(&self, other: &StationName) -> bool {
        self.station == other.station && (self.is_bare() || self.field == other.field)
    }
}

impl From<&str> for StationName {
    fn from(s: &str) -> Self {
        Self::from_literal(s)
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.to_literal())
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.station)?;
        if !self.is_bare() {
            write!(f, "{}{}", FIELD_SEPARATOR, self.field)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Literal form survives a parse/print cycle.
        #[test]
        fn literal_roundtrip(station in "[A-Za-z]{1,8}", field in "[A-Za-z0-9]{0,4}") {
            let name = StationName::new(station, field);
            prop_assert_eq!(StationName::from_literal(&name.to_literal()), name);
        }

        /// The bare form contains every qualified variant of the same station.
        #[test]
        fn bare_contains_qualified(station in "[A-Za-z]{1,8}", field in "[A-Za-z0-9]{1,4}") {
            let bare = StationName::bare(station.clone());
            let qualified = StationName::new(station, field);
            prop_assert!(bare.equal_or_contains(&qualified));
            prop_assert!(!qualified.equal_or_contains(&bare));
        }
    }
}
