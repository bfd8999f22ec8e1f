pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod sim;
pub mod ui;
