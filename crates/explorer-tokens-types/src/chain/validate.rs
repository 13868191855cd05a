use serde_json::Value;

use crate::chain::{ChainId, Cluster};

/// Validates an untrusted cluster value, e.g. a field of an inbound JSON request.
///
/// Returns the cluster only when `value` is a non-negative JSON integer naming one of
/// the supported clusters *and* that cluster resolves to a chain for `genesis_hash`.
/// Strings, floats, booleans and out-of-range integers are rejected.
pub fn is_valid_cluster(value: &Value, genesis_hash: Option<&str>) -> Option<Cluster> {
    let cluster = value.as_u64().and_then(Cluster::from_u64)?;
    ChainId::resolve(cluster, genesis_hash).map(|_| cluster)
}
