//! Process-wide embedded PostgreSQL cluster.
//!
//! Wraps `pg-embed-setup-unpriv`'s shared handle with a short retry loop;
//! binary downloads fail intermittently when several test binaries bootstrap
//! at once. The library panics instead of returning an error when its worker
//! binary is missing; that panic is caught and reported as a setup failure
//! so the skip policy in [`super::cluster_skip`] applies.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

use super::cluster_skip::panic_reason;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "quora_embedded_test";

/// Return the shared cluster, starting it on first use.
///
/// `PG_PASSWORD` is pinned while the cluster starts so a reused data
/// directory keeps accepting logins; the embedded settings otherwise generate
/// a fresh password per process while `initdb` only runs once.
pub fn shared_cluster_handle() -> Result<&'static ClusterHandle, String> {
    let _password = std::env::var_os("PG_PASSWORD")
        .is_none()
        .then(|| env_lock::lock_env([("PG_PASSWORD", Some(STABLE_PASSWORD))]));
    let mut attempt = 1;
    loop {
        let outcome = panic::catch_unwind(AssertUnwindSafe(
            pg_embedded_setup_unpriv::test_support::shared_cluster_handle,
        ))
        .map_err(|payload| panic_reason(payload.as_ref()))?;
        match outcome {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => return Err(error.to_string()),
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}
