//! [`Field`] of a partial update.

use std::str::FromStr;

/// New state of an optional field in a partial update.
///
/// Absence of the field in an update is expressed as `Option<Field<T>>`
/// being [`None`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field<T> {
    /// Field is cleared.
    Unset,

    /// Field is set to the value.
    Value(T),
}

impl<T> Field<T> {
    /// Converts this [`Field`] into an [`Option`].
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Unset => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Maps the contained value, if any.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Unset => Field::Unset,
            Self::Value(v) => Field::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Unset, Self::Value)
    }
}

impl<T> From<Field<T>> for Option<T> {
    fn from(v: Field<T>) -> Self {
        v.into_option()
    }
}

impl<T: FromStr> FromStr for Field<T> {
    type Err = T::Err;

    /// Parses a [`Field`], treating a blank string as [`Field::Unset`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Ok(Self::Unset)
        } else {
            s.parse().map(Self::Value)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Field;

    #[test]
    fn blank_input_unsets() {
        assert_eq!("".parse::<Field<u16>>(), Ok(Field::Unset));
        assert_eq!("  ".parse::<Field<u16>>(), Ok(Field::Unset));
        assert_eq!(" 7 ".parse::<Field<u16>>(), Ok(Field::Value(7)));
        assert!("x".parse::<Field<u16>>().is_err());
    }

    #[test]
    fn converts_to_option() {
        assert_eq!(Field::Value(3).map(|v| v * 2).into_option(), Some(6));
        assert_eq!(Option::<u8>::from(Field::Unset), None);
        assert_eq!(Field::from(Some(1)), Field::Value(1));
    }
}
