use finance_pipeline::application::config::RateLimiterConfig;
use finance_pipeline::application::rate_limiter::RateLimiter;

#[test]
fn test_clones_share_the_bucket() {
    let config = RateLimiterConfig {
        max_requests: 1,
        period_seconds: 60,
        burst_size: 2,
    };
    let limiter = RateLimiter::new(&config);
    let clone = limiter.clone();

    assert!(limiter.check());
    assert!(clone.check());
    assert!(!limiter.check());
}

#[test]
fn test_debug_output() {
    let limiter = RateLimiter::new(&RateLimiterConfig::default());
    assert!(format!("{:?}", limiter).contains("RateLimiter"));
}
