//! Policy for suites that need the embedded PostgreSQL cluster.
//!
//! Bootstrapping downloads PostgreSQL binaries, which is not possible on
//! every machine. Suites skip with a marker line by default; setting
//! `REQUIRE_TEST_CLUSTER` to a truthy value turns setup failures into test
//! failures so CI cannot silently lose coverage.

/// Returns true when `REQUIRE_TEST_CLUSTER` is "1", "true", or "yes"
/// (case-insensitive).
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Text of a caught panic, for setup code that panics instead of erroring.
pub fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "cluster setup panicked".to_owned())
}

/// Report a cluster setup failure.
///
/// Returns `None` after printing a `SKIP-TEST-CLUSTER` marker, or panics when
/// the cluster is required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipping_is_the_default() {
        let _guard = env_lock::lock_env([("REQUIRE_TEST_CLUSTER", None::<&str>)]);
        assert!(!test_cluster_required());
        assert!(handle_cluster_setup_failure::<()>("offline").is_none());
    }

    #[test]
    fn caught_setup_panics_become_skip_reasons() {
        let _guard = env_lock::lock_env([("REQUIRE_TEST_CLUSTER", None::<&str>)]);
        let outcome: std::thread::Result<()> =
            std::panic::catch_unwind(|| panic!("PG_EMBEDDED_WORKER is not set"));
        let payload = outcome.expect_err("setup panicked");
        let reason = panic_reason(payload.as_ref());
        assert_eq!(reason, "PG_EMBEDDED_WORKER is not set");
        assert!(handle_cluster_setup_failure::<()>(reason).is_none());
    }

    #[test]
    fn truthy_values_require_the_cluster() {
        let _guard = env_lock::lock_env([("REQUIRE_TEST_CLUSTER", Some("YES"))]);
        assert!(test_cluster_required());
    }
}
