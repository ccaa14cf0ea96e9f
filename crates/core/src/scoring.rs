//! Scoring module - line-clear points, leveling and gravity speed
//!
//! The rules are intentionally simple:
//! - Line clears use the classic table `[0, 40, 100, 300, 1200]` times the level.
//! - Clears beyond four rows score as four rows.
//! - Hard drops earn 2 points per row fallen.
//! - Level starts at 1 and rises every 10 lines.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES,
    MIN_DROP_MS,
};

/// Points for clearing `lines` rows at `level` (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let index = lines.min(LINE_SCORES.len() - 1);
    LINE_SCORES[index].saturating_mul(level)
}

/// Bonus for a hard drop of `rows` rows
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a running line total
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds
///
/// `max(50, 1000 - (level - 1) * 50)`. Advisory only: the engine never
/// schedules anything itself.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speed_up = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(speed_up).max(MIN_DROP_MS)
}
