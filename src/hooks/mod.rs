pub mod use_api;
pub mod use_screen;
pub mod use_screens;
