pub mod api;
pub mod commands;
pub mod config;
pub mod controllers;
pub mod models;
pub mod ui;
