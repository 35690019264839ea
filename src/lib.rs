// src/lib.rs
//! Store locator backend: stores with unique slugs, tags, reviews and
//! rankings behind an axum HTTP API.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
