//! Deterministic seed derivation.
//!
//! Every source owns its own `StdRng` whose seed is a pure function of the
//! engine seed and the source's anchor. Two sources never share a stream, so
//! adding or removing one leaves the others' dice untouched.

use plume_core::types::GridCoord;

/// SplitMix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// 64-bit seed for the source anchored at `anchor`.
pub fn source_seed(engine_seed: u64, anchor: GridCoord) -> u64 {
    const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;
    [anchor.x, anchor.y, anchor.z]
        .into_iter()
        .fold(mix64(engine_seed), |state, axis| {
            mix64(state.wrapping_add(GOLDEN) ^ u64::from(axis as u32))
        })
}
