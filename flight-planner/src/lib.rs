//! Flight route planner server.
//!
//! Loads a snapshot of the world's airline routes and answers "how can I
//! get from here to there in at most N stops, and what would it cost?"

pub mod config;
pub mod currency;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod planner;
pub mod pricing;
pub mod web;
