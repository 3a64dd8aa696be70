//! HTTP handlers

pub mod auth;
pub mod contacts;
pub mod health;
pub mod session;
