#![allow(dead_code)]

use coconserve::data::EdgeList;
use coconserve::ids::NodeKind;
use coconserve::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Array edges of the worked example: one array cluster {A1, A2}
pub const EXAMPLE_ARRAY_EDGES: &str = "A1\tA2\n";

/// Protein edges of the worked example
pub const EXAMPLE_PROTEIN_EDGES: &str = "A1_#0\tA1_#1\nA2_#0\tA3_#0\n";

pub fn array_edges(pairs: &[(&str, &str)]) -> EdgeList {
    EdgeList::from_pairs(NodeKind::Array, pairs.iter().copied())
}

pub fn protein_edges(pairs: &[(&str, &str)]) -> EdgeList {
    EdgeList::from_pairs(NodeKind::Protein, pairs.iter().copied())
}

pub fn config(coverage: f64, mininode: usize) -> Config {
    Config {
        coverage,
        mininode,
        workers: 2,
        ..Default::default()
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn array_id(group: usize, slot: usize) -> String {
    format!("ctg{}.1__{}_{}", group, slot * 1000, slot * 1000 + 37)
}

/// A deterministic dataset with clusters of mixed coverage.
///
/// Each array group is a chain of four array instances. Each protein cluster
/// is a chain whose members sit around arrays drawn from one or more groups,
/// plus the occasional array context absent from the array graph.
pub fn synthetic(groups: usize, protein_clusters: usize) -> (EdgeList, EdgeList) {
    let mut arrays = Vec::new();
    for group in 0..groups {
        for slot in 0..3 {
            arrays.push((array_id(group, slot), array_id(group, slot + 1)));
        }
    }

    let mut proteins = Vec::new();
    for cluster in 0..protein_clusters {
        let size = 2 + cluster % 5;
        let members: Vec<String> = (0..size)
            .map(|j| {
                let context = if j == 4 {
                    format!("orphan{}__0_1", cluster)
                } else {
                    let group = (cluster + j * (cluster % 3)) % groups;
                    array_id(group, (cluster + j) % 4)
                };
                format!("{}_#{}", context, j + cluster * 10)
            })
            .collect();
        for pair in members.windows(2) {
            proteins.push((pair[0].clone(), pair[1].clone()));
        }
    }

    (
        EdgeList::from_pairs(NodeKind::Array, arrays),
        EdgeList::from_pairs(NodeKind::Protein, proteins),
    )
}
