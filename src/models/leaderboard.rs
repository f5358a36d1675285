use serde::{Deserialize, Serialize};

/// One ranked row of a cup's leaderboard. `position` is the competition
/// rank, not a finishing position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub points: i64,
    pub qualified: bool,
    pub position: i64,
}
