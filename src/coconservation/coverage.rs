//! Coverage of a protein cluster by an array cluster

use crate::coconservation::normalize::ContextProfile;
use crate::ids::ArrayId;
use std::collections::HashSet;

/// Fraction of the protein cluster's members whose array context lies in the
/// array cluster.
///
/// The intersection walks the smaller operand and probes the larger one. An
/// empty intersection (or an empty profile) gives 0.
pub fn coverage(array_cluster: &HashSet<ArrayId>, profile: &ContextProfile) -> f64 {
    if profile.size() == 0 {
        return 0.0;
    }

    let covered: u64 = if array_cluster.len() <= profile.len() {
        array_cluster
            .iter()
            .map(|id| profile.multiplicity(id.as_str()))
            .sum()
    } else {
        profile
            .iter()
            .filter(|(id, _)| array_cluster.contains(*id))
            .map(|(_, count)| count)
            .sum()
    };

    covered as f64 / profile.size() as f64
}

/// Whether a pair with this coverage is co-conserved. Compares the unrounded
/// value.
pub fn passes(coverage: f64, threshold: f64) -> bool {
    coverage >= threshold
}

/// Round to two decimals for reporting
pub fn round_coverage(coverage: f64) -> f64 {
    (coverage * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProteinId;

    fn profile(raw: &[&str]) -> ContextProfile {
        let ids: Vec<ProteinId> = raw.iter().map(|id| ProteinId::parse(id).unwrap()).collect();
        ContextProfile::from_members(&ids)
    }

    fn arrays(raw: &[&str]) -> HashSet<ArrayId> {
        raw.iter().map(|id| ArrayId::new(*id)).collect()
    }

    #[test]
    fn weights_contexts_by_multiplicity() {
        let p = profile(&["A1_#0", "A1_#1", "A2_#0", "A3_#0"]);
        assert_eq!(coverage(&arrays(&["A1", "A2"]), &p), 0.75);
        assert_eq!(coverage(&arrays(&["A3"]), &p), 0.25);
    }

    #[test]
    fn result_does_not_depend_on_which_side_is_smaller() {
        let p = profile(&["A1_#0", "A1_#1", "A2_#0"]);
        let small = arrays(&["A1"]);
        let large = arrays(&["A1", "B1", "B2", "B3", "B4", "B5"]);
        assert_eq!(coverage(&small, &p), coverage(&large, &p));
    }

    #[test]
    fn disjoint_sets_have_zero_coverage() {
        let p = profile(&["A1_#0", "A2_#0"]);
        assert_eq!(coverage(&arrays(&["B1", "B2"]), &p), 0.0);
        assert_eq!(coverage(&HashSet::new(), &p), 0.0);
    }

    #[test]
    fn threshold_uses_unrounded_value() {
        let p = profile(&["A1_#0", "A2_#0", "A3_#0"]);
        let cov = coverage(&arrays(&["A1"]), &p);
        assert_eq!(round_coverage(cov), 0.33);
        assert!(!passes(cov, 0.334));
        assert!(passes(cov, 0.333));
        assert!(passes(0.0, 0.0));
    }
}
