//! Per-result scoring rules.
//!
//! Pure functions from one raw result to the points it awards and whether
//! it qualifies the player for the final. Server tags not listed here are
//! scored as zero rather than rejected; bad uploads are a data-quality
//! problem, not a scoring error.

/// Main qualifying servers. Top three finishes here qualify for the final.
pub const SERVER_UNITED: &str = "united";
/// Secondary servers. Smaller awards, never qualifying on their own.
pub const SERVER_NATIONS: &str = "nations";

const UNITED_TOP3_AWARD: i64 = 50_000;
const UNITED_FOURTH_AWARD: i64 = 15_000;
const UNITED_FIFTH_AWARD: i64 = 10_000;
const UNITED_POINTS_THRESHOLD: i64 = 6_969;
const UNITED_THRESHOLD_AWARD: i64 = 7_500;

const NATIONS_FIRST_AWARD: i64 = 6_500;
const NATIONS_SECOND_AWARD: i64 = 6_000;
const NATIONS_THIRD_AWARD: i64 = 5_500;
const NATIONS_POINTS_THRESHOLD: i64 = 4_500;
const NATIONS_THRESHOLD_AWARD: i64 = 5_000;

/// Points awarded for one raw result.
///
/// Position is taken as-is; anything outside the fixed-award placements
/// (including zero or negative positions) falls through to the
/// points-based tier, and below the threshold the raw points pass through
/// unchanged as the player's personal score.
pub fn points_for(server: &str, position: i64, points: i64) -> i64 {
    match server {
        SERVER_UNITED => match position {
            1..=3 => UNITED_TOP3_AWARD,
            4 => UNITED_FOURTH_AWARD,
            5 => UNITED_FIFTH_AWARD,
            _ if points >= UNITED_POINTS_THRESHOLD => UNITED_THRESHOLD_AWARD,
            _ => points,
        },
        SERVER_NATIONS => match position {
            1 => NATIONS_FIRST_AWARD,
            2 => NATIONS_SECOND_AWARD,
            3 => NATIONS_THIRD_AWARD,
            _ if points >= NATIONS_POINTS_THRESHOLD => NATIONS_THRESHOLD_AWARD,
            _ => points,
        },
        _ => 0,
    }
}

/// Whether one raw result qualifies the player for the final: a top-three
/// finish on a united server, nothing else.
pub fn is_qualifying(server: &str, position: i64) -> bool {
    server == SERVER_UNITED && (1..=3).contains(&position)
}
