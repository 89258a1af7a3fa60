pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod lms;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
