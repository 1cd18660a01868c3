//! Star rating.
//!
//! A star is lost when the move count lands exactly on a threshold. The
//! comparison is equality, not `>=`: moves advance one at a time, so each
//! threshold is hit exactly once per game. A move count that skipped a
//! threshold would never lose that star.

/// Does reaching `moves` cost a star?
#[must_use]
pub fn loses_star(thresholds: &[u32], moves: u32) -> bool {
    thresholds.contains(&moves)
}
