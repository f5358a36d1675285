pub mod cups;
pub mod leaderboard;
pub mod results;
