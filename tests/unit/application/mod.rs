mod test_persistence;
mod test_rate_limiter;
