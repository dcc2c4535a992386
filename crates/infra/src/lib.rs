//! Infrastructure layer: repository contracts and storage adapters, use cases,
//! configuration and seed data.

pub mod config;
pub mod repository;
pub mod seed;
pub mod use_cases;
