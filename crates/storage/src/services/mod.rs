pub mod team_sync;
