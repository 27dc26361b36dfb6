/// Which side of a game is credited with the win.
///
/// There is no draw: any result where the away side does not strictly outscore the
/// home side, a tie included, is a home win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    AwayWin,
    HomeWin
}

impl GameOutcome {
    pub fn from_scores(away_score: i32, home_score: i32) -> GameOutcome {
        if away_score > home_score {
            GameOutcome::AwayWin
        } else {
            GameOutcome::HomeWin
        }
    }

    /// Actual result indicators `(S_away, S_home)`
    pub fn actual_scores(&self) -> (f64, f64) {
        match self {
            GameOutcome::AwayWin => (1.0, 0.0),
            GameOutcome::HomeWin => (0.0, 1.0)
        }
    }
}
