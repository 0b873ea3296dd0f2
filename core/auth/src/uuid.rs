//! Account id derivation for UUID-keyed providers

use uuid::Uuid;

/// Convert a provider account UUID into a stable numeric id
///
/// Bitbucket keys accounts by UUID (sent wrapped in braces), while the
/// validation policy and the rest of the identity model work on integers. The
/// conversion folds the 128-bit value into 64 bits by XOR-ing its halves:
/// deterministic, and collision-free for practical purposes.
pub fn account_id_from_uuid(raw: &str) -> Result<u64, uuid::Error> {
    let parsed = Uuid::parse_str(raw)?;
    let (high, low) = parsed.as_u64_pair();

    Ok(high ^ low)
}
