pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod flows;
pub mod ops;
pub mod ui;
pub mod wizard;
