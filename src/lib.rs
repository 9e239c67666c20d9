//! Grid pursuit simulation: enemies plan A* paths across an obstacle field
//! and steer after a keyboard-driven player who is racing for a goal.

pub mod game;

// ============================================================================
// Profiling Macros
// ============================================================================

/// Log once every 100 fixed ticks, only in `perf_stats` builds.
///
/// `$tick` is anything with a `.0: u64` tick count (normally `Res<SimTick>`).
/// Without the feature the macro expands to nothing and its arguments are
/// never evaluated.
///
/// ```ignore
/// profile_log!(tick, "{} enemies without a path", pathless);
/// ```
#[macro_export]
#[cfg(feature = "perf_stats")]
macro_rules! profile_log {
    ($tick:expr, $($arg:tt)*) => {
        if $tick.0 % 100 == 0 {
            bevy::prelude::info!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "perf_stats"))]
macro_rules! profile_log {
    ($tick:expr, $($arg:tt)*) => {};
}
