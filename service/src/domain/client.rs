//! [`Client`] definitions.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, FromStr};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

#[cfg(doc)]
use crate::domain::{Lot, Sale};

/// Client buying [`Lot`]s via [`Sale`]s.
#[derive(Clone, Debug)]
pub struct Client {
    /// [`Curp`] identifying this [`Client`].
    pub curp: Curp,

    /// [`Name`] of this [`Client`].
    pub name: Name,
}

/// [CURP] identifying a [`Client`].
///
/// [CURP]: https://en.wikipedia.org/wiki/Unique_Population_Registry_Code
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Curp(String);

impl Curp {
    /// Creates a new [`Curp`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `curp` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(curp: impl Into<String>) -> Self {
        Self(curp.into())
    }

    /// Creates a new [`Curp`] if the given `curp` is valid.
    #[must_use]
    pub fn new(curp: impl Into<String>) -> Option<Self> {
        let curp = curp.into();
        Self::check(&curp).then_some(Self(curp))
    }

    /// Checks whether the given `curp` is a valid [`Curp`].
    fn check(curp: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Curp`] format: 4 letters of the
        /// name, 6 digits of the birth date, sex, 5 letters of the birth
        /// state and consonants, homonymy differentiator and a check digit,
        /// 18 characters in total.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Z]{4}\d{6}[HM][A-Z]{5}[A-Z0-9]\d$")
                .expect("valid regex")
        });

        REGEX.is_match(curp.as_ref())
    }
}

impl FromStr for Curp {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Curp`")
    }
}

/// Name of a [`Client`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

#[cfg(test)]
mod spec {
    use super::Curp;

    #[test]
    fn accepts_well_formed_curp() {
        assert!(Curp::new("GOMC950113HDFRRL09").is_some());
        assert!(Curp::new("MAHA880522MOCRRN04").is_some());
    }

    #[test]
    fn rejects_malformed_curp() {
        assert!(Curp::new("").is_none());
        assert!(Curp::new("GOMC950113HDFRRL0").is_none());
        assert!(Curp::new("GOMC950113HDFRRL091").is_none());
        assert!(Curp::new("gomc950113hdfrrl09").is_none());
        assert!(Curp::new("GOMC950113XDFRRL09").is_none());
        assert!(Curp::new("GOMC95011AHDFRRL09").is_none());
    }
}
