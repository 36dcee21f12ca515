use std::collections::HashSet;

use nestling_core::config::{AppConfig, LoadOptions};
use nestling_core::demand::{predict_demand, DemandInput, DemandLevel};
use nestling_core::jitter::FixedJitter;
use nestling_core::purchase::{predict_purchase, PurchaseInput, PurchaseVerdict};
use nestling_core::recommend::{CatalogItem, CATALOG};
use nestling_core::taxonomy::{CustomerType, ProductCategory};
use serde::Serialize;

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let checks = vec![
        check_config(),
        check_catalog(&CATALOG),
        check_purchase_scorer(),
        check_demand_scorer(),
    ];

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_config() -> DoctorCheck {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: format!(
                "configuration valid; server would listen on {}",
                config.listen_address()
            ),
        },
        Err(error) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_catalog(catalog: &[CatalogItem]) -> DoctorCheck {
    let mut seen = HashSet::new();
    let problems: Vec<String> = catalog
        .iter()
        .filter_map(|item| {
            let [min, max] = item.age_range;
            if !seen.insert(item.key) {
                Some(format!("duplicate key `{}`", item.key))
            } else if min > max {
                Some(format!("`{}` has inverted age range {min}-{max}", item.key))
            } else {
                None
            }
        })
        .collect();

    if catalog.is_empty() {
        DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: "activity catalog is empty".to_string(),
        }
    } else if problems.is_empty() {
        DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Pass,
            details: format!("{} activities with unique keys and valid age ranges", catalog.len()),
        }
    } else {
        DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: problems.join("; "),
        }
    }
}

fn check_purchase_scorer() -> DoctorCheck {
    let probe = PurchaseInput {
        category: ProductCategory::Diaper,
        price: 150.0,
        discount: 20.0,
        customer_type: CustomerType::Parent,
    };
    let result = predict_purchase(&probe, &mut FixedJitter(0.0));
    let ok = result.label == PurchaseVerdict::Yes && (result.score - 1.35).abs() < 1e-9;

    DoctorCheck {
        name: "purchase_scorer",
        status: if ok { CheckStatus::Pass } else { CheckStatus::Fail },
        details: format!("reference probe scored {:.2} ({})", result.score, result.label),
    }
}

fn check_demand_scorer() -> DoctorCheck {
    let probe = DemandInput {
        product_type: ProductCategory::Diaper,
        previous_sales: 50.0,
        delivery_time: 1.0,
        price: 200.0,
    };
    let result = predict_demand(&probe, &mut FixedJitter(0.0));
    let ok = result.label == DemandLevel::High && (result.score - 10.0).abs() < 1e-9;

    DoctorCheck {
        name: "demand_scorer",
        status: if ok { CheckStatus::Pass } else { CheckStatus::Fail },
        details: format!("reference probe scored {:.1} ({})", result.score, result.label),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use nestling_core::recommend::CatalogItem;

    use super::{check_catalog, check_demand_scorer, check_purchase_scorer, CheckStatus};

    fn item(key: &'static str, age_range: [u32; 2]) -> CatalogItem {
        CatalogItem {
            key,
            title: "t",
            description: "d",
            tags: &[],
            age_range,
            duration_minutes: 10,
        }
    }

    #[test]
    fn reference_probes_pass() {
        assert_eq!(check_purchase_scorer().status, CheckStatus::Pass);
        assert_eq!(check_demand_scorer().status, CheckStatus::Pass);
    }

    #[test]
    fn catalog_problems_are_reported() {
        let broken = [item("a", [3, 6]), item("a", [4, 5]), item("b", [7, 2])];

        let check = check_catalog(&broken);

        assert_eq!(check.status, CheckStatus::Fail);
        assert!(check.details.contains("duplicate key `a`"));
        assert!(check.details.contains("inverted age range 7-2"));
    }

    #[test]
    fn empty_catalog_fails() {
        assert_eq!(check_catalog(&[]).status, CheckStatus::Fail);
    }
}
