pub mod show;
pub mod viewer;
