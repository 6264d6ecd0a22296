//! Coordinate string parsing.
//!
//! Accepted forms:
//! - module: `org:name` or `org::name`
//! - dependency: `org:name:version` or `org::name:version`, optionally
//!   followed by `:configuration`
//!
//! The `::` form appends the Scala binary version to the name
//! (`org::name` with Scala `2.13.12` is `org:name_2.13`). Attributes follow
//! the name as `;key=value` pairs.

pub mod pattern;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{Configuration, Dependency, Module};

/// Coordinate parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed coordinates '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("Malformed attribute '{attribute}' in '{input}', expected key=value")]
    MalformedAttribute { input: String, attribute: String },

    #[error("'{input}' uses '::' but no Scala version was given")]
    MissingScalaVersion { input: String },
}

impl ParseError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Binary version of a Scala version (`2.13.12` → `2.13`, `3.3.1` → `3`)
pub fn scala_binary_version(scala_version: &str) -> Option<String> {
    let scala_version = scala_version.trim();
    if scala_version.is_empty() {
        return None;
    }
    if scala_version == "3" || scala_version.starts_with("3.") {
        return Some("3".to_string());
    }
    let mut parts = scala_version.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) if !major.is_empty() && !minor.is_empty() => {
            Some(format!("{}.{}", major, minor))
        },
        _ => Some(scala_version.to_string()),
    }
}

/// Parse a module string
pub fn parse_module(input: &str, scala_version: &str) -> Result<Module, ParseError> {
    let input = input.trim();
    let (organization, rest, cross) = split_organization(input)?;

    if rest.contains(':') {
        return Err(ParseError::malformed(input, "unexpected ':' after module name"));
    }

    let (name, attributes) = split_attributes(input, rest)?;
    module(input, organization, name, attributes, cross, scala_version)
}

/// Parse a dependency string
pub fn parse_dependency(input: &str, scala_version: &str) -> Result<Dependency, ParseError> {
    let input = input.trim();
    let (organization, rest, cross) = split_organization(input)?;

    let parts: Vec<&str> = rest.split(':').collect();
    let (name_part, version, configuration) = match parts.as_slice() {
        [name, version] => (*name, *version, None),
        [name, version, configuration] => (*name, *version, Some(*configuration)),
        _ => {
            return Err(ParseError::malformed(
                input,
                "expected org:name:version[:configuration]",
            ))
        },
    };

    if version.is_empty() {
        return Err(ParseError::malformed(input, "empty version"));
    }

    let (name, attributes) = split_attributes(input, name_part)?;
    let module = module(input, organization, name, attributes, cross, scala_version)?;

    let mut dependency = Dependency::new(module, version);
    if let Some(configuration) = configuration {
        if configuration.is_empty() {
            return Err(ParseError::malformed(input, "empty configuration"));
        }
        dependency = dependency.with_configuration(Configuration::new(configuration));
    }

    Ok(dependency)
}

fn split_organization(input: &str) -> Result<(&str, &str, bool), ParseError> {
    if let Some((organization, rest)) = input.split_once("::") {
        return Ok((organization, rest, true));
    }
    match input.split_once(':') {
        Some((organization, rest)) => Ok((organization, rest, false)),
        None => Err(ParseError::malformed(input, "expected org:name")),
    }
}

fn split_attributes<'a>(
    input: &str,
    name_part: &'a str,
) -> Result<(&'a str, BTreeMap<String, String>), ParseError> {
    let mut pieces = name_part.split(';');
    let name = pieces.next().unwrap_or_default();
    let mut attributes = BTreeMap::new();

    for attribute in pieces {
        match attribute.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                attributes.insert(key.to_string(), value.to_string());
            },
            _ => {
                return Err(ParseError::MalformedAttribute {
                    input: input.to_string(),
                    attribute: attribute.to_string(),
                })
            },
        }
    }

    Ok((name, attributes))
}

fn module(
    input: &str,
    organization: &str,
    name: &str,
    attributes: BTreeMap<String, String>,
    cross: bool,
    scala_version: &str,
) -> Result<Module, ParseError> {
    if organization.is_empty() {
        return Err(ParseError::malformed(input, "empty organization"));
    }
    if name.is_empty() {
        return Err(ParseError::malformed(input, "empty module name"));
    }

    let name = if cross {
        let binary = scala_binary_version(scala_version).ok_or_else(|| {
            ParseError::MissingScalaVersion {
                input: input.to_string(),
            }
        })?;
        format!("{}_{}", name, binary)
    } else {
        name.to_string()
    };

    Ok(Module::new(organization, name).with_attributes(attributes))
}
