//! Reduction of protein clusters to their array contexts

use crate::ids::{ArrayId, ProteinId};
use std::collections::HashMap;

/// Array contexts touched by one protein cluster, with the number of cluster
/// members reducing to each context.
///
/// The key set is the cluster's normalized id set; the multiplicities always
/// sum to the cluster size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextProfile {
    multiplicities: HashMap<ArrayId, u64>,
    size: u64,
}

impl ContextProfile {
    /// Normalize the members of a protein cluster
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a ProteinId>,
    {
        let mut multiplicities: HashMap<ArrayId, u64> = HashMap::new();
        let mut size = 0;
        for member in members {
            *multiplicities.entry(member.array_context().clone()).or_insert(0) += 1;
            size += 1;
        }

        Self {
            multiplicities,
            size,
        }
    }

    /// Number of protein ids the profile was built from
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of distinct array contexts
    pub fn len(&self) -> usize {
        self.multiplicities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multiplicities.is_empty()
    }

    /// Members reducing to `context`, 0 if the context is absent
    pub fn multiplicity(&self, context: &str) -> u64 {
        self.multiplicities.get(context).copied().unwrap_or(0)
    }

    /// Normalized ids with their multiplicities
    pub fn iter(&self) -> impl Iterator<Item = (&ArrayId, u64)> + '_ {
        self.multiplicities.iter().map(|(id, &count)| (id, count))
    }
}
