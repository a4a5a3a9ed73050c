pub mod config;
pub mod events;
pub mod gui;
pub mod settings;
pub mod sys;
pub mod theme;
pub mod timer;
