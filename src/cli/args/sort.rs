//! Sort-order flags for the CVE commands
//!
//! Each family is a `clap::ValueEnum`, which is the single table of legal
//! values: parsing, `Display`, help text and the options list are all read
//! from it.

use std::ffi::OsStr;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Arg, Command, ValueEnum};
use serde::Serialize;

use crate::error::ParamError;

/// Server-side sort criteria understood by the search extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortCriteria {
    Severity,
    AlphabeticAsc,
    AlphabeticDsc,
    UpdateTime,
}

/// Shared behaviour of the sort-order flag families.
pub trait SortOption: ValueEnum + Copy + 'static {
    /// GraphQL sort criteria this option maps onto.
    fn criteria(self) -> SortCriteria;

    /// Canonical flag value.
    fn name(&self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }

    /// All legal values, in declaration order.
    fn options() -> Vec<String> {
        Self::value_variants().iter().map(|v| v.name()).collect()
    }

    /// Legal values joined for messages.
    fn options_str() -> String {
        Self::options().join(", ")
    }

    /// Parse a flag value, rejecting anything outside the family.
    fn parse_option(value: &str) -> Result<Self, ParamError> {
        <Self as ValueEnum>::from_str(value, false).map_err(|_| ParamError::InvalidOption {
            value: value.to_string(),
            options: Self::options_str(),
        })
    }
}

/// Sort order for CVE lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CveListSort {
    /// Most severe first
    #[default]
    Severity,
}

impl SortOption for CveListSort {
    fn criteria(self) -> SortCriteria {
        match self {
            CveListSort::Severity => SortCriteria::Severity,
        }
    }
}

/// Sort order for image lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ImageListSort {
    /// Repository and tag, ascending
    #[default]
    #[value(name = "alpha-asc")]
    AlphaAsc,
    /// Repository and tag, descending
    #[value(name = "alpha-dsc")]
    AlphaDsc,
    /// Most recently updated first
    UpdateTime,
    /// Most severe first
    Severity,
}

impl SortOption for ImageListSort {
    fn criteria(self) -> SortCriteria {
        match self {
            ImageListSort::AlphaAsc => SortCriteria::AlphabeticAsc,
            ImageListSort::AlphaDsc => SortCriteria::AlphabeticDsc,
            ImageListSort::UpdateTime => SortCriteria::UpdateTime,
            ImageListSort::Severity => SortCriteria::Severity,
        }
    }
}

macro_rules! sort_flag_impls {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ParamError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_option(s)
            }
        }
    )*};
}

sort_flag_impls!(CveListSort, ImageListSort);

/// `--sort-by` value parser.
///
/// Parses through [`SortOption::parse_option`] so a bad value reports the
/// "invalid option" error, while help and completions still list the
/// enum's values.
#[derive(Debug, Clone, Copy)]
pub struct SortValueParser<T>(PhantomData<T>);

impl<T: SortOption> SortValueParser<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: SortOption> Default for SortValueParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypedValueParser for SortValueParser<T>
where
    T: SortOption + Send + Sync,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &Command,
        _arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(value) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };

        T::parse_option(value).map_err(|err| {
            clap::Error::raw(ErrorKind::InvalidValue, format!("{err}\n")).with_cmd(cmd)
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(
            T::value_variants()
                .iter()
                .filter_map(ValueEnum::to_possible_value),
        ))
    }
}
