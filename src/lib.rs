//! Valyn Core: dashboard simulation and AI proxy service

pub mod api;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
