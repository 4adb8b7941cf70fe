// server/src/lib.rs

//! HTTP front end for the storefront cart service.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod web;
