pub mod decrypt;
pub mod install;
