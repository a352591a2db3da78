//! Formatting flags applied around a block's rendered text.
//!
//! Every block carries a [`Flags`] set. After a block produces its raw text,
//! [`format`] applies the case transform and pads the result with the
//! selected prefix and suffix.
//!
//! ## Order of application
//!
//! 1. Case: `upper`, then `lower`, then `capitalize`. Each one that is set
//!    runs in that order, so the last one wins.
//! 2. Prefix: `newline` (`"\n"`) beats `spaceBefore` (`" "`).
//! 3. Suffix: `newlineAfter` (`"\n"`) beats `spaceAfter` (`" "`).
//!
//! ```rust
//! use replykit_render::{format, Flag, Flags};
//!
//! let flags = Flags::from_iter([Flag::Upper, Flag::NewlineAfter]);
//! assert_eq!(format("ok", &flags), "OK\n");
//! ```
//!
//! ## Wire format
//!
//! The editor stores flags as an object of booleans:
//!
//! ```json
//! {"newline": true, "upper": false}
//! ```
//!
//! A plain list of names (`["newline", "upper"]`) is accepted as well.
//! Unknown names are dropped. `null`, or any other shape, is the empty set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::values::is_truthy;

/// A single formatting option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// Uppercase the whole text.
    Upper,
    /// Lowercase the whole text.
    Lower,
    /// Uppercase the first character.
    Capitalize,
    /// Prefix with a line break.
    Newline,
    /// Prefix with a space (ignored when `Newline` is set).
    SpaceBefore,
    /// Suffix with a line break.
    NewlineAfter,
    /// Suffix with a space (ignored when `NewlineAfter` is set).
    SpaceAfter,
}

impl Flag {
    /// All flags, in application order.
    pub const ALL: [Flag; 7] = [
        Flag::Upper,
        Flag::Lower,
        Flag::Capitalize,
        Flag::Newline,
        Flag::SpaceBefore,
        Flag::NewlineAfter,
        Flag::SpaceAfter,
    ];

    /// The name used in stored templates.
    pub fn name(self) -> &'static str {
        match self {
            Flag::Upper => "upper",
            Flag::Lower => "lower",
            Flag::Capitalize => "capitalize",
            Flag::Newline => "newline",
            Flag::SpaceBefore => "spaceBefore",
            Flag::NewlineAfter => "newlineAfter",
            Flag::SpaceAfter => "spaceAfter",
        }
    }

    /// Looks a flag up by its stored name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Flag> {
        Flag::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// The set of formatting options on a block. Defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<FlagsRepr>")]
pub struct Flags(BTreeSet<Flag>);

impl Flags {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `flag` added.
    pub fn with(mut self, flag: Flag) -> Self {
        self.0.insert(flag);
        self
    }

    /// Adds a flag. Returns `false` if it was already set.
    pub fn insert(&mut self, flag: Flag) -> bool {
        self.0.insert(flag)
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the set flags in application order.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    fn prefix(&self) -> &'static str {
        if self.contains(Flag::Newline) {
            "\n"
        } else if self.contains(Flag::SpaceBefore) {
            " "
        } else {
            ""
        }
    }

    fn suffix(&self) -> &'static str {
        if self.contains(Flag::NewlineAfter) {
            "\n"
        } else if self.contains(Flag::SpaceAfter) {
            " "
        } else {
            ""
        }
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: Map<String, Value> = self
            .iter()
            .map(|flag| (flag.name().to_string(), Value::Bool(true)))
            .collect();
        map.serialize(serializer)
    }
}

/// Accepted input shapes for [`Flags`].
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagsRepr {
    Map(Map<String, Value>),
    List(Vec<Value>),
    Other(serde::de::IgnoredAny),
}

impl From<Option<FlagsRepr>> for Flags {
    fn from(repr: Option<FlagsRepr>) -> Self {
        match repr {
            None | Some(FlagsRepr::Other(_)) => Flags::new(),
            Some(FlagsRepr::Map(map)) => map
                .iter()
                .filter(|(_, value)| is_truthy(value))
                .filter_map(|(name, _)| Flag::from_name(name))
                .collect(),
            Some(FlagsRepr::List(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .filter_map(Flag::from_name)
                .collect(),
        }
    }
}

/// Applies `flags` to `text`. Never fails.
///
/// ```rust
/// use replykit_render::{format, Flag, Flags};
///
/// let flags = Flags::new().with(Flag::Capitalize).with(Flag::SpaceBefore);
/// assert_eq!(format("добрый день", &flags), " Добрый день");
/// assert_eq!(format("plain", &Flags::new()), "plain");
/// ```
pub fn format(text: &str, flags: &Flags) -> String {
    let mut body = text.to_string();
    if flags.contains(Flag::Upper) {
        body = body.to_uppercase();
    }
    if flags.contains(Flag::Lower) {
        body = body.to_lowercase();
    }
    if flags.contains(Flag::Capitalize) {
        body = capitalize(&body);
    }

    let (prefix, suffix) = (flags.prefix(), flags.suffix());
    let mut out = String::with_capacity(prefix.len() + body.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(&body);
    out.push_str(suffix);
    out
}

/// Uppercases the first character; the rest is left as is.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
