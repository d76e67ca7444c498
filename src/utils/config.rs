/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::warn;

/// Reads an environment variable and parses it, falling back to `default`
///
/// A variable that is set but cannot be parsed is reported at `warn` level
/// and replaced by the default; startup never fails on a bad value.
///
/// # Arguments
///
/// * `env_var` - The name of the environment variable
/// * `default` - Value used when the variable is missing or malformed
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("Invalid value for {}: {:?} ({:?}), using default", env_var, val, e);
            default
        }),
        Err(_) => default,
    }
}

/// Reads an environment variable and parses it, returning `None` when it is
/// missing, empty or malformed
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    env::var(env_var)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .and_then(|val| val.trim().parse::<T>().ok())
}

/// Reads a comma-separated environment variable into a list of trimmed,
/// non-empty items, falling back to `default` (same format) when unset
pub fn get_env_list(env_var: &str, default: &str) -> Vec<String> {
    let raw = env::var(env_var).unwrap_or_else(|_| default.to_string());
    split_list(&raw)
}

/// Splits a comma-separated list, trimming items and dropping empty ones
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
