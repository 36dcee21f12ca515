use std::env;
use std::sync::{Mutex, OnceLock};

use chrono::NaiveDate;
use nestling_cli::commands::demand::DemandArgs;
use nestling_cli::commands::purchase::PurchaseArgs;
use nestling_cli::commands::recommend::RecommendArgs;
use nestling_cli::commands::{config, demand, doctor, purchase, recommend};
use serde_json::Value;

fn diaper_purchase() -> PurchaseArgs {
    PurchaseArgs {
        category: Some("Diaper".to_string()),
        price: Some(150.0),
        discount: Some(20.0),
        customer_type: Some("Parent".to_string()),
    }
}

#[test]
fn purchase_returns_verdict_and_explanation() {
    let result = purchase::run(diaper_purchase(), Some(7));
    assert_eq!(result.exit_code, 0, "expected successful purchase scoring");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "purchase");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["result"]["label"], "Yes");
    let explanation = payload["result"]["explanation"].as_str().unwrap_or("");
    assert!(explanation.starts_with("Customer will purchase this product."));
    assert!(explanation.ends_with("Current discount is effective for driving purchases."));
}

#[test]
fn seeded_confidence_is_reproducible() {
    let first = parse_payload(&purchase::run(diaper_purchase(), Some(11)).output);
    let second = parse_payload(&purchase::run(diaper_purchase(), Some(11)).output);

    let confidence = first["result"]["confidence"].as_f64().unwrap_or(-1.0);
    assert_eq!(first["result"]["confidence"], second["result"]["confidence"]);
    assert!((0.75..=0.90).contains(&confidence), "confidence {confidence} outside band");
}

#[test]
fn purchase_reports_missing_fields() {
    let result = purchase::run(
        PurchaseArgs { category: Some("Toy".to_string()), ..PurchaseArgs::default() },
        None,
    );
    assert_eq!(result.exit_code, 2, "expected invalid input exit code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "invalid_input");
    assert_eq!(payload["message"], "Missing required fields: price, discount");
}

#[test]
fn demand_rejects_negative_values() {
    let result = demand::run(
        DemandArgs {
            product_type: Some("Toy".to_string()),
            previous_sales: Some(-1.0),
            delivery_time: Some(2.0),
            price: Some(300.0),
        },
        None,
    );
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "demand");
    assert!(payload["message"].as_str().unwrap_or("").contains("previous_sales"));
}

#[test]
fn demand_scores_medium_scenario() {
    let result = demand::run(
        DemandArgs {
            product_type: Some("Toy".to_string()),
            previous_sales: Some(40.0),
            delivery_time: Some(3.0),
            price: Some(450.0),
        },
        Some(1),
    );
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["result"]["label"], "Medium");
    assert!(payload["message"].as_str().unwrap_or("").contains("Medium"));
}

#[test]
fn recommend_filters_by_age_and_uses_config_limit() {
    with_env(&[("NESTLING_RECOMMENDATIONS_MAX_RESULTS", "2")], || {
        let result = recommend::run(RecommendArgs {
            dob: NaiveDate::from_ymd_opt(2015, 1, 1),
            today: NaiveDate::from_ymd_opt(2024, 6, 1),
            interests: vec!["coding".to_string()],
            ..RecommendArgs::default()
        });
        assert_eq!(result.exit_code, 0, "expected recommend success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["result"]["age"], 9);
        let items = payload["result"]["recommendations"].as_array().cloned().unwrap_or_default();
        assert_eq!(items.len(), 1, "only coding covers age 9");
        assert_eq!(items[0]["key"], "coding");
        assert!(items[0]["details"]["steps"].is_array());
    });
}

#[test]
fn recommend_reports_config_failure() {
    with_env(&[("NESTLING_RECOMMENDATIONS_MAX_RESULTS", "zero")], || {
        let result = recommend::run(RecommendArgs::default());
        assert_eq!(result.exit_code, 3, "expected config failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn config_reports_env_sources() {
    with_env(&[("NESTLING_LOG_LEVEL", "debug")], || {
        let result = config::run();
        let output = result.output;

        assert_eq!(result.exit_code, 0);
        assert!(output.contains("- logging.level = debug (source: env (NESTLING_LOG_LEVEL))"));
        assert!(output.contains("- server.port = 8080 (source: default)"));
    });
}

#[test]
fn config_exits_with_config_code_on_invalid_values() {
    with_env(&[("NESTLING_SERVER_PORT", "0")], || {
        let result = config::run();

        assert_eq!(result.exit_code, 3);
        assert!(result.output.starts_with("config validation failed:"));
    });
}

#[test]
fn doctor_passes_with_default_config() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["checks"].as_array().map(Vec::len), Some(4));
    });
}

#[test]
fn doctor_fails_on_invalid_config() {
    with_env(&[("NESTLING_GROUPING_K", "0")], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 1);
        assert!(result.output.contains("- [fail] config_validation"));
        assert!(result.output.contains("- [ok] catalog_integrity"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "NESTLING_SERVER_BIND_ADDRESS",
        "NESTLING_SERVER_PORT",
        "NESTLING_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "NESTLING_LOGGING_LEVEL",
        "NESTLING_LOGGING_FORMAT",
        "NESTLING_LOG_LEVEL",
        "NESTLING_LOG_FORMAT",
        "NESTLING_RECOMMENDATIONS_MAX_RESULTS",
        "NESTLING_GROUPING_K",
        "NESTLING_GROUPING_MIN_GROUP_SIZE",
        "NESTLING_GROUPING_MAX_GROUP_SIZE",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
