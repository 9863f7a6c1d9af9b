//! Pure mapping from a service identifier string to a transport [`Kind`].
//!
//! This is the fallback used when an [`Edge`](crate::graph::types::Edge)
//! doesn't carry an explicit `kind` (older graph schema). Rule order
//! matters: the MRT-prefix test runs before the LRT substring test.

use crate::graph::types::Kind;

const MRT_PREFIXES: &[&str] = &["NSL", "EWL", "NEL", "CCL", "DTL", "TEL"];
const LRT_NEEDLES: &[&str] = &["BPLrt", "SKLrt", "PGLrt", "LRT"];

pub fn classify(service: &str) -> Kind {
    if service == "WALK" {
        return Kind::Walk;
    }
    if MRT_PREFIXES.iter().any(|p| service.starts_with(p)) {
        return Kind::Mrt;
    }
    if LRT_NEEDLES.iter().any(|n| service.contains(n)) || service.ends_with("LRT") {
        return Kind::Lrt;
    }
    Kind::Bus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_literal() {
        assert_eq!(classify("WALK"), Kind::Walk);
    }

    #[test]
    fn mrt_prefixes() {
        for p in ["NSL", "EWL", "NEL", "CCL", "DTL", "TEL"] {
            assert_eq!(classify(&format!("{p}2")), Kind::Mrt);
        }
    }

    #[test]
    fn lrt_substring_or_suffix() {
        assert_eq!(classify("BPLrt"), Kind::Lrt);
        assert_eq!(classify("SKLrt1"), Kind::Lrt);
        assert_eq!(classify("SomethingLRT"), Kind::Lrt);
    }

    #[test]
    fn mrt_precedes_lrt_when_both_could_match() {
        // Starts with a MRT prefix, so MRT wins even though it also
        // happens to end with "LRT" as a substring pattern.
        assert_eq!(classify("NSLRT"), Kind::Mrt);
    }

    #[test]
    fn default_is_bus() {
        assert_eq!(classify("10"), Kind::Bus);
        assert_eq!(classify("857"), Kind::Bus);
    }
}
