use finance_pipeline::utils::config::{get_env_list, get_env_or_default, get_env_or_none, split_list};
use std::env;

#[test]
fn test_get_env_or_default_with_existing_var() {
    unsafe {
        env::set_var("FP_TEST_VAR_STRING", "test_value");
        let result: String = get_env_or_default("FP_TEST_VAR_STRING", "default".to_string());
        assert_eq!(result, "test_value");
        env::remove_var("FP_TEST_VAR_STRING");
    }
}

#[test]
fn test_get_env_or_default_with_missing_var() {
    unsafe {
        env::remove_var("FP_MISSING_VAR");
        let result: String = get_env_or_default("FP_MISSING_VAR", "default".to_string());
        assert_eq!(result, "default");
    }
}

#[test]
fn test_get_env_or_default_with_integer() {
    unsafe {
        env::set_var("FP_TEST_VAR_INT", " 42 ");
        let result: u16 = get_env_or_default("FP_TEST_VAR_INT", 0);
        assert_eq!(result, 42);
        env::remove_var("FP_TEST_VAR_INT");
    }
}

#[test]
fn test_get_env_or_default_with_invalid_parse() {
    unsafe {
        env::set_var("FP_TEST_VAR_INVALID", "not_a_number");
        let result: u32 = get_env_or_default("FP_TEST_VAR_INVALID", 99);
        assert_eq!(result, 99); // Should return default
        env::remove_var("FP_TEST_VAR_INVALID");
    }
}

#[test]
fn test_get_env_or_none_treats_empty_as_missing() {
    unsafe {
        env::set_var("FP_TEST_VAR_EMPTY", "  ");
        let result: Option<String> = get_env_or_none("FP_TEST_VAR_EMPTY");
        assert!(result.is_none());
        env::remove_var("FP_TEST_VAR_EMPTY");
    }
}

#[test]
fn test_get_env_or_none_with_value() {
    unsafe {
        env::set_var("FP_TEST_VAR_SOME", "7");
        let result: Option<u32> = get_env_or_none("FP_TEST_VAR_SOME");
        assert_eq!(result, Some(7));
        env::remove_var("FP_TEST_VAR_SOME");
    }
}

#[test]
fn test_get_env_list() {
    unsafe {
        env::set_var("FP_TEST_VAR_LIST", "cassandra-1, cassandra-2,,");
        assert_eq!(
            get_env_list("FP_TEST_VAR_LIST", "cassandra"),
            vec!["cassandra-1".to_string(), "cassandra-2".to_string()]
        );
        env::remove_var("FP_TEST_VAR_LIST");
        assert_eq!(get_env_list("FP_TEST_VAR_LIST", "cassandra"), vec!["cassandra".to_string()]);
    }
}

#[test]
fn test_split_list_drops_empty_items() {
    assert_eq!(split_list(" AAPL ,, MSFT"), vec!["AAPL", "MSFT"]);
    assert!(split_list(" , ").is_empty());
}
