pub mod list;
pub mod manage;
pub mod practice;
pub mod profile;
pub mod show;
