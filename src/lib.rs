//! ot-portal - Web portal for an online game server
//!
//! Account character listing and news administration over the game's
//! relational database.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
