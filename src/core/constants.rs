//! Shared rule constants for the round state machine and the simulator.

// =============================================================================
// ROUND RULES
// =============================================================================

/// Rolls at the start of a round during which a 7 pays a bonus instead of busting.
pub const BUILDING_ROLLS: u32 = 3;

/// Bank bonus for rolling a 7 during the building phase.
pub const SEVEN_BONUS: u64 = 70;

/// The sum that pays the bonus while building and busts afterwards.
pub const LUCKY_SUM: u8 = 7;

/// Faces on each die.
pub const DIE_FACES: u8 = 6;

// =============================================================================
// SIMULATION DEFAULTS
// =============================================================================

/// Rounds played in one game.
pub const DEFAULT_ROUNDS: u32 = 20;

/// Games played in one simulation run.
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Outlier multiple used by the exploratory single-strategy mode.
pub const DEFAULT_OUTLIER_MULTIPLE: f64 = 3.0;

/// Strategies in the default constant-threshold ladder.
pub const DEFAULT_LADDER_COUNT: u32 = 50;

/// Threshold spacing of the default ladder (0, 200, 400, ...).
pub const DEFAULT_LADDER_STEP: u64 = 200;

/// Games handed to a rayon worker at once in parallel mode.
pub const PARALLEL_CHUNK_SIZE: usize = 64;
