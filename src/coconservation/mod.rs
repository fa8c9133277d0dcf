//! Array/protein co-conservation filtering
//!
//! A protein cluster and an array cluster are co-conserved when enough of the
//! protein cluster's members were predicted around arrays belonging to the
//! array cluster. Every array cluster is tested against every protein cluster;
//! the members of all passing pairs form the [`RetainedSet`].

pub mod assemble;
pub mod coverage;
pub mod normalize;
pub mod scheduler;

use crate::cluster::Cluster;
use crate::error::Result;
use crate::graph::CompressedGraph;
use crate::ids::{ArrayId, ProteinId};
use normalize::ContextProfile;
use scheduler::ChunkOutcome;
use std::collections::{BTreeSet, HashSet};

/// One connected component of the pruned array graph
#[derive(Debug, Clone)]
pub struct ArrayCluster {
    pub index: usize,
    pub members: HashSet<ArrayId>,
}

/// One connected component of the pruned protein graph
#[derive(Debug, Clone)]
pub struct ProteinCluster {
    pub index: usize,
    pub members: Vec<ProteinId>,
    pub profile: ContextProfile,
}

impl ProteinCluster {
    pub fn new(index: usize, members: Vec<ProteinId>) -> Self {
        let profile = ContextProfile::from_members(&members);
        Self {
            index,
            members,
            profile,
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Member ids of the array graph's clusters
pub fn array_clusters(graph: &CompressedGraph, clusters: &[Cluster]) -> Vec<ArrayCluster> {
    clusters
        .iter()
        .map(|cluster| ArrayCluster {
            index: cluster.id as usize,
            members: cluster
                .members
                .iter()
                .map(|&node| ArrayId::new(graph.node_id(node as usize)))
                .collect(),
        })
        .collect()
}

/// Member ids of the protein graph's clusters, each normalized to its
/// array contexts
pub fn protein_clusters(graph: &CompressedGraph, clusters: &[Cluster]) -> Result<Vec<ProteinCluster>> {
    clusters
        .iter()
        .map(|cluster| {
            let ids = cluster
                .members
                .iter()
                .map(|&node| ProteinId::parse(graph.node_id(node as usize)))
                .collect::<Result<Vec<_>>>()?;
            Ok(ProteinCluster::new(cluster.id as usize, ids))
        })
        .collect()
}

/// Ids kept by the co-conservation filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetainedSet {
    /// Members of every protein cluster in a passing pair
    pub proteins: BTreeSet<ProteinId>,

    /// Members of every array cluster in a passing pair
    pub arrays: BTreeSet<ArrayId>,
}

impl RetainedSet {
    /// Expand passing cluster indices into their original member ids
    pub fn from_outcome(
        outcome: &ChunkOutcome,
        arrays: &[ArrayCluster],
        proteins: &[ProteinCluster],
    ) -> Self {
        let proteins = outcome
            .protein_clusters
            .iter()
            .flat_map(|&idx| proteins[idx].members.iter().cloned())
            .collect();
        let arrays = outcome
            .array_clusters
            .iter()
            .flat_map(|&idx| arrays[idx].members.iter().cloned())
            .collect();

        Self { proteins, arrays }
    }

    /// Array contexts of the retained proteins, deduplicated
    pub fn protein_contexts(&self) -> BTreeSet<&ArrayId> {
        self.proteins.iter().map(|id| id.array_context()).collect()
    }
}
