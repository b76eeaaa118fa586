/*!
Collision query tolerances.

Keeping these together makes tuning easier and keeps the query code free of
magic numbers. Distances are in meters.
*/

/// Inflation applied to probe AABBs before broad-phase candidate queries.
/// Keeps shapes that barely touch the probe inside the candidate set.
pub const QUERY_MARGIN: f32 = 0.02;
