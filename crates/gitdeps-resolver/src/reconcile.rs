//! Lock reconciliation: split the final lock into the partitions the
//! manifest persists.

use std::collections::BTreeMap;

/// Partition a final lock map into `direct` (urls the root manifest
/// declared directly) and `indirect` (urls introduced transitively).
pub fn partition_lock(
    locked: &BTreeMap<String, String>,
    original_direct: &BTreeMap<String, String>,
) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut direct = BTreeMap::new();
    let mut indirect = BTreeMap::new();
    for (url, reference) in locked {
        if original_direct.contains_key(url) {
            direct.insert(url.clone(), reference.clone());
        } else {
            indirect.insert(url.clone(), reference.clone());
        }
    }
    (direct, indirect)
}
