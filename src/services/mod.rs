pub mod api;
pub mod screens;
