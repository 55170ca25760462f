use glam::IVec3;

/// Relative movement candidates, grouped into priority tiers. A particle takes
/// the first viable candidate: tiers in this fixed order, candidates within a
/// multi-offset tier in shuffled order.
pub const MOVEMENT_TIERS: [&[IVec3]; 5] = [&RISE, &RISE_LATERAL, &LATERAL, &SINK_LATERAL, &SINK];

/// Largest tier size; sizes the shuffle scratch buffer.
pub const MAX_TIER_LEN: usize = 9;

/// Straight up.
pub const RISE: [IVec3; 1] = [IVec3::new(0, 1, 0)];

/// The 8 lateral neighbours one level up.
pub const RISE_LATERAL: [IVec3; 8] = [
    IVec3::new(-1, 1, -1),
    IVec3::new(-1, 1, 0),
    IVec3::new(-1, 1, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(0, 1, 1),
    IVec3::new(1, 1, -1),
    IVec3::new(1, 1, 0),
    IVec3::new(1, 1, 1),
];

/// The 8 lateral neighbours at the same level, plus staying put.
pub const LATERAL: [IVec3; 9] = [
    IVec3::new(-1, 0, -1),
    IVec3::new(-1, 0, 0),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 0, -1),
    IVec3::new(0, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(1, 0, -1),
    IVec3::new(1, 0, 0),
    IVec3::new(1, 0, 1),
];

/// The 8 lateral neighbours one level down.
pub const SINK_LATERAL: [IVec3; 8] = [
    IVec3::new(-1, -1, -1),
    IVec3::new(-1, -1, 0),
    IVec3::new(-1, -1, 1),
    IVec3::new(0, -1, -1),
    IVec3::new(0, -1, 1),
    IVec3::new(1, -1, -1),
    IVec3::new(1, -1, 0),
    IVec3::new(1, -1, 1),
];

/// Straight down.
pub const SINK: [IVec3; 1] = [IVec3::new(0, -1, 0)];
