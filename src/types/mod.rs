pub mod diff;
pub mod github;
