/// Provider session (cookie and crumb) handling
pub mod auth;
/// Application configuration module
pub mod config;
/// Module containing service interfaces and traits
pub mod interfaces;
/// Rate limiter module for provider request throttling
pub mod rate_limiter;
/// Market data, forecast and persistence services
pub mod services;
