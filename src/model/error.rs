use crate::database::db_structs::{Season, TeamId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Team {team_id} has no initial rating")]
    MissingInitialRating { team_id: TeamId },

    #[error("No seasons were supplied")]
    NoSeasons,

    #[error("Season {season} appears more than once in the season order")]
    DuplicateSeason { season: Season },

    #[error("Season {season} is not part of the season order")]
    UnknownSeason { season: Season },

    #[error("Team {team_id} was never initialized")]
    UnknownTeam { team_id: TeamId },

    #[error("Team {team_id} has no season before season {season} to carry a rating from")]
    NoPreviousSeason { team_id: TeamId, season: Season },

    #[error("Team {team_id} has no ratings in season {previous_season}, the season before {season}")]
    MissingPreviousSeason {
        team_id: TeamId,
        season: Season,
        previous_season: Season
    },

    #[error("Season {season} for team {team_id} has already been seeded")]
    AlreadySeeded { team_id: TeamId, season: Season },

    #[error("Season {season} for team {team_id} has not been seeded")]
    NotSeeded { team_id: TeamId, season: Season },

    #[error("Game {game_id} pits team {team_id} against itself")]
    SelfMatch { game_id: i32, team_id: TeamId }
}
