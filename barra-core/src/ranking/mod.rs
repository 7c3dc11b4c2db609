//! Rankings built on scored results: categories, Best Lifter, teams.

pub mod best_lifter;
pub mod category;
pub mod order;
pub mod team;

pub use best_lifter::{
    select_best_lifters, BestLifterCategory, BestLifterKey, BestLifterReport, BestLifterStanding,
    DEFAULT_MIN_ATHLETES,
};
pub use category::{
    categorize, is_categorized, rank_category, Category, CategoryKey, Positions, RankedResult,
};
pub use order::compare_weight_classes;
pub use team::{
    score_teams, PointTable, TeamAthlete, TeamRules, TeamScope, TeamScore, TeamStandings,
    DEFAULT_COUNTED_ATHLETES, DEFAULT_MIN_TEAMS, DEFAULT_POINT_TABLE,
};
