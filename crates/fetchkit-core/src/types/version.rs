//! Version ordering used by the engine.
//!
//! Version strings are not required to be semver: `1.2`, `2.13.12`,
//! `1.0-RC3`, `3.0.0-M1` and `1.0.0.Final` all occur in the wild. A version
//! is split into numeric and qualifier items on `.`, `-`, `_`, `+` and on
//! digit/letter transitions, and compared item by item. `0`, release
//! qualifiers (`Final`, `GA`, `RELEASE`) and missing trailing items are all
//! the same item, so `1 == 1.0 == 1.0.0 == 1.0.Final`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Parsed version string
#[derive(Debug, Clone)]
pub struct Version {
    repr: String,
    items: Vec<Item>,
}

/// Single component of a version
///
/// Items are totally ordered: pre-release qualifiers, then zero (which also
/// stands for release qualifiers and missing trailing items), then service
/// packs, then positive numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Known pre-release tag; `text` is only kept for unknown qualifiers
    PreRelease { rank: i32, text: String },
    Zero,
    ServicePack,
    /// Positive number, digits with leading zeros stripped
    Number(String),
}

/// Rank of qualifiers nobody agreed on, below every known pre-release tag
const UNKNOWN_QUALIFIER_RANK: i32 = -6;

/// Stand-in for the items past the end of the shorter version
static PADDING: Item = Item::Zero;

fn qualifier(text: String) -> Item {
    let rank = match text.as_str() {
        "" | "ga" | "final" | "release" => return Item::Zero,
        "sp" => return Item::ServicePack,
        "alpha" | "a" => -5,
        "beta" | "b" => -4,
        "milestone" | "m" => -3,
        "rc" | "cr" => -2,
        "snapshot" => -1,
        _ => UNKNOWN_QUALIFIER_RANK,
    };
    let text = if rank == UNKNOWN_QUALIFIER_RANK {
        text
    } else {
        String::new()
    };
    Item::PreRelease { rank, text }
}

impl Version {
    /// Parse a version string; any string is a valid version
    pub fn parse(input: &str) -> Self {
        let repr = input.trim().to_string();
        let mut items = tokenize(&repr);
        while items.last() == Some(&Item::Zero) {
            items.pop();
        }
        Self { repr, items }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// True for versions carrying a pre-release qualifier (`-RC1`, `-SNAPSHOT`, ...)
    pub fn is_prerelease(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::PreRelease { .. }))
    }
}

fn tokenize(input: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    let flush = |current: &mut String, is_digit: bool, items: &mut Vec<Item>| {
        if current.is_empty() {
            return;
        }
        let token = std::mem::take(current);
        if is_digit {
            let trimmed = token.trim_start_matches('0');
            items.push(if trimmed.is_empty() {
                Item::Zero
            } else {
                Item::Number(trimmed.to_string())
            });
        } else {
            items.push(qualifier(token.to_lowercase()));
        }
    };

    for ch in input.chars() {
        if matches!(ch, '.' | '-' | '_' | '+') {
            flush(&mut current, current_is_digit, &mut items);
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            flush(&mut current, current_is_digit, &mut items);
        }
        current_is_digit = is_digit;
        current.push(ch);
    }
    flush(&mut current, current_is_digit, &mut items);

    items
}

impl Item {
    fn class(&self) -> u8 {
        match self {
            Item::PreRelease { .. } => 0,
            Item::Zero => 1,
            Item::ServicePack => 2,
            Item::Number(_) => 3,
        }
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Item::Number(a), Item::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (
                Item::PreRelease { rank: ra, text: ta },
                Item::PreRelease { rank: rb, text: tb },
            ) => ra.cmp(rb).then_with(|| ta.cmp(tb)),
            _ => self.class().cmp(&other.class()),
        }
    }
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::parse(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|index| {
                let a = self.items.get(index).unwrap_or(&PADDING);
                let b = other.items.get(index).unwrap_or(&PADDING);
                a.cmp(b)
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}
