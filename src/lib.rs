//! IGDB proxy
//!
//! Forwards requests to the IGDB API and serves a cached game search backed by
//! a relational store.

pub mod assets;
pub mod config;
pub mod database;
pub mod entities;
pub mod errors;
pub mod igdb;
pub mod models;
pub mod observability;
pub mod services;
pub mod web;
