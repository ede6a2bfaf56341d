//! Error types for the recipe client.
//!
//! # Design
//! Callers see exactly one of four kinds. Transport detail (ureq errors,
//! serde errors, raw status lines) is logged where it is observed and then
//! normalized away, so nothing above `RecipeService` ever matches on a
//! transport-level error.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::preferences::Constraint;

/// Fallback message when a failing response carries no usable detail.
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

/// Message for requests that were sent but never answered.
pub const CONNECTIVITY_MESSAGE: &str = "No response from server. Please check your connection.";

/// Message for every other failure.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Normalized error surfaced by the recipe client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// One or more required preference fields are missing. Never sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request went out but no response came back (refused, DNS,
    /// timeout, connection dropped).
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Connectivity,

    /// Anything else, including a 2xx payload that does not match the
    /// recipe schema.
    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected,
}

/// The set of unmet required-field constraints of a preference form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    unmet: BTreeSet<Constraint>,
}

impl ValidationError {
    pub(crate) fn new(unmet: BTreeSet<Constraint>) -> Self {
        Self { unmet }
    }

    pub fn unmet(&self) -> &BTreeSet<Constraint> {
        &self.unmet
    }

    pub fn contains(&self, constraint: Constraint) -> bool {
        self.unmet.contains(&constraint)
    }

    /// `(field, message)` pairs in form order, for inline display.
    pub fn field_messages(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.unmet.iter().map(|c| (c.field(), c.message()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for constraint in &self.unmet {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(constraint.message())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
