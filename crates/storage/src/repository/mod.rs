pub mod match_odds;
pub mod matches;
