use std::collections::HashSet;

/// Registers that must not be chosen as a write target within a given
/// generation scope. Read sources are never constrained.
pub type ExcludeSet = HashSet<&'static str>;

pub const TEMP_REGS: [&str; 10] = [
    "$t0", "$t1", "$t2", "$t3", "$t4", "$t5", "$t6", "$t7", "$t8", "$t9",
];

pub const SAVED_REGS: [&str; 8] = [
    "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7",
];

pub const ZERO: &str = "$zero";

/// Implicitly written by `jal`; must survive until the matching `jr`.
pub const RA: &str = "$ra";

/// Anchor for all load/store offset addressing.
pub const BASE: &str = "$s0";

/// Returned when an exclusion set filters out every candidate.
pub const FALLBACK: &str = "$t0";

/// Counter/step pair reserved by the loop composer.
pub const LOOP_COUNTER: &str = "$t8";
pub const LOOP_STEP: &str = "$t9";

/// Disjoint counter/step pair for an inner loop nested in another loop.
pub const INNER_COUNTER: &str = "$s6";
pub const INNER_STEP: &str = "$s7";

/// All general-purpose registers minus `exclude`, in catalog order.
pub fn candidates(exclude: &ExcludeSet) -> Vec<&'static str> {
    TEMP_REGS
        .iter()
        .chain(SAVED_REGS.iter())
        .copied()
        .filter(|reg| !exclude.contains(reg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(TEMP_REGS.len(), 10);
        assert_eq!(SAVED_REGS.len(), 8);
    }

    #[test]
    fn test_catalogs_are_disjoint() {
        for reg in TEMP_REGS {
            assert!(!SAVED_REGS.contains(&reg));
        }
    }

    #[test]
    fn test_fixed_purpose_registers_outside_general_pool() {
        let all = candidates(&ExcludeSet::new());
        assert!(!all.contains(&ZERO));
        assert!(!all.contains(&RA));
    }

    #[test]
    fn test_reserved_registers_come_from_catalog() {
        assert!(SAVED_REGS.contains(&BASE));
        assert!(TEMP_REGS.contains(&FALLBACK));
        assert!(TEMP_REGS.contains(&LOOP_COUNTER));
        assert!(TEMP_REGS.contains(&LOOP_STEP));
        assert!(SAVED_REGS.contains(&INNER_COUNTER));
        assert!(SAVED_REGS.contains(&INNER_STEP));
    }

    #[test]
    fn test_inner_pair_disjoint_from_outer_pair() {
        assert_ne!(INNER_COUNTER, LOOP_COUNTER);
        assert_ne!(INNER_COUNTER, LOOP_STEP);
        assert_ne!(INNER_STEP, LOOP_COUNTER);
        assert_ne!(INNER_STEP, LOOP_STEP);
    }

    #[test]
    fn test_candidates_honor_exclusion() {
        let exclude: ExcludeSet = [LOOP_COUNTER, LOOP_STEP, BASE].into_iter().collect();
        let filtered = candidates(&exclude);
        assert_eq!(filtered.len(), 15);
        assert!(!filtered.contains(&LOOP_COUNTER));
        assert!(!filtered.contains(&LOOP_STEP));
        assert!(!filtered.contains(&BASE));
    }
}
