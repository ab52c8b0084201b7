//! Tournaments API - players, nested tournaments and registrations
//!
//! This crate provides the REST API for managing:
//! - Players, identified by gamertag
//! - Tournaments nested up to five levels deep
//! - Player registrations, which require registration in the parent tournament
//!
//! Responses carry hypermedia links describing the follow-up requests.

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod hateoas;
pub mod routes;
pub mod services;
pub mod state;
