pub mod catalog;
pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
