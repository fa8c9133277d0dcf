//! Array and protein node identifiers
//!
//! Protein ids are written upstream as `<array-context>_#<ordinal>`, where the
//! array context names the CRISPR array instance the ORF was called around.
//! Parsing them once into [`ProteinId`] turns normalization into a field
//! projection.

use crate::error::{CoConservationError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Separator between the array context and the ORF ordinal
pub const ORDINAL_SEPARATOR: &str = "_#";

/// Identifier of one array instance (scaffold name plus genomic start/end)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArrayId(String);

impl ArrayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArrayId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the Nth ORF predicted around an array instance.
///
/// The ordinal keeps its digits as written, so the id renders back to exactly
/// the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProteinId {
    pub array_context: ArrayId,
    ordinal: String,
}

impl ProteinId {
    pub fn new(array_context: ArrayId, ordinal: impl Into<String>) -> Self {
        Self {
            array_context,
            ordinal: ordinal.into(),
        }
    }

    /// Parse the `<array-context>_#<ordinal>` text form
    pub fn parse(id: &str) -> Result<Self> {
        let invalid = || CoConservationError::InvalidProteinId(id.to_string());

        let (context, ordinal) = id.rsplit_once(ORDINAL_SEPARATOR).ok_or_else(invalid)?;
        if context.is_empty() || ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(Self::new(ArrayId::new(context), ordinal))
    }

    /// Ordinal digits as they appeared in the input
    pub fn ordinal(&self) -> &str {
        &self.ordinal
    }

    pub fn array_context(&self) -> &ArrayId {
        &self.array_context
    }
}

impl FromStr for ProteinId {
    type Err = CoConservationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProteinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.array_context, ORDINAL_SEPARATOR, self.ordinal)
    }
}

/// Which kind of node an edge list carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Array,
    Protein,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Array => f.write_str("array"),
            NodeKind::Protein => f.write_str("protein"),
        }
    }
}
