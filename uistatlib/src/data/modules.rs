//! Module usage counts from a bundler module report.
//!
//! The report (webpack's `stats.json` shape) lists every bundled module
//! together with the reasons it was included. Each reason names the request
//! that pulled the module in (`userRequest`) and the module that made it
//! (`moduleName`, the issuer). Counting reasons per request shows which
//! legacy components are still referenced, and from where.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UistatError;
use crate::Result;

/// A pre-computed bundler module report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModuleReport {
    #[serde(default)]
    pub modules: Vec<ReportModule>,
}

/// A bundled module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModule {
    #[serde(default)]
    pub name: String,
    /// Opaque exports metadata, copied into usage records as-is
    #[serde(default)]
    pub used_exports: Value,
    #[serde(default)]
    pub reasons: Vec<ModuleReason>,
}

/// One reference site of a module.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReason {
    /// Kept untyped: real reports sometimes carry non-string requests
    #[serde(default)]
    pub user_request: Value,
    #[serde(default)]
    pub module_name: Option<String>,
}

/// How often a requested module is referenced, and by whom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleUsageRecord {
    pub module: String,
    /// Name of the first bundled module seen for this request
    pub entry: String,
    pub exports: Value,
    pub count: u64,
    /// Referencing modules in report order
    pub issuers: Vec<Option<String>>,
}

/// The module usage output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUsageReport {
    pub timestamp: DateTime<Utc>,
    pub module_stats: Vec<ModuleUsageRecord>,
}

/// Substring allow-list for requested module names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFilter {
    substrings: Vec<String>,
}

impl Default for ModuleFilter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ModuleFilter {
    /// An empty list matches every name (it behaves as `[""]`).
    pub fn new(substrings: Vec<String>) -> Self {
        let substrings = if substrings.is_empty() {
            vec![String::new()]
        } else {
            substrings
        };
        Self { substrings }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.substrings.iter().any(|s| name.contains(s.as_str()))
    }
}

/// Read and parse a module report file.
pub fn load_module_report(path: impl AsRef<Path>) -> Result<ModuleReport> {
    let path = path.as_ref();
    debug!("Loading module report from {:?}", path);

    let contents = fs::read_to_string(path).map_err(|e| UistatError::ReportRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| UistatError::ReportParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Count references per requested module.
///
/// Records come out in the order their request was first seen. With
/// `sort_descending` they are stably sorted by count, so equal counts keep
/// that order. Reasons whose request is not a string are skipped.
pub fn aggregate_module_usage(
    report: &ModuleReport,
    filter: &ModuleFilter,
    sort_descending: bool,
) -> Vec<ModuleUsageRecord> {
    let mut records: Vec<ModuleUsageRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for module in &report.modules {
        for reason in &module.reasons {
            let Some(request) = reason.user_request.as_str() else {
                skipped += 1;
                continue;
            };

            if !filter.matches(request) {
                continue;
            }

            match index.get(request).copied() {
                Some(i) => {
                    let record = &mut records[i];
                    record.count += 1;
                    record.issuers.push(reason.module_name.clone());
                }
                None => {
                    trace!("First reference to {} from {:?}", request, reason.module_name);
                    index.insert(request.to_string(), records.len());
                    records.push(ModuleUsageRecord {
                        module: request.to_string(),
                        entry: module.name.clone(),
                        exports: module.used_exports.clone(),
                        count: 1,
                        issuers: vec![reason.module_name.clone()],
                    });
                }
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} reasons without a string request", skipped);
    }

    if sort_descending {
        records.sort_by(|a, b| b.count.cmp(&a.count));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn reason(request: Value, issuer: &str) -> ModuleReason {
        ModuleReason {
            user_request: request,
            module_name: Some(issuer.to_string()),
        }
    }

    fn module(name: &str, reasons: Vec<ModuleReason>) -> ReportModule {
        ReportModule {
            name: name.to_string(),
            used_exports: json!(true),
            reasons,
        }
    }

    fn requests(records: &[ModuleUsageRecord]) -> Vec<(&str, u64)> {
        records.iter().map(|r| (r.module.as_str(), r.count)).collect()
    }

    #[test]
    fn test_module_filter() {
        let filter = ModuleFilter::new(vec!["Name".into(), "somethingElse".into()]);
        assert!(filter.matches("componentName"));
        assert!(!filter.matches("other"));

        let all = ModuleFilter::default();
        assert!(all.matches("anything"));
        assert!(all.matches(""));
    }

    #[test]
    fn test_two_issuers_one_record() {
        let report = ModuleReport {
            modules: vec![module(
                "./src/Cell.js",
                vec![
                    reason(json!("./Cell"), "./src/Table.js"),
                    reason(json!("./Cell"), "./src/Row.js"),
                ],
            )],
        };

        let records = aggregate_module_usage(&report, &ModuleFilter::default(), false);

        assert_eq!(
            records,
            vec![ModuleUsageRecord {
                module: "./Cell".to_string(),
                entry: "./src/Cell.js".to_string(),
                exports: json!(true),
                count: 2,
                issuers: vec![
                    Some("./src/Table.js".to_string()),
                    Some("./src/Row.js".to_string()),
                ],
            }]
        );
    }

    #[test]
    fn test_entry_and_exports_come_from_first_sighting() {
        let mut second = module("./lib/Cell.js", vec![reason(json!("./Cell"), "c")]);
        second.used_exports = json!(["default"]);
        let report = ModuleReport {
            modules: vec![
                module("./src/Cell.js", vec![reason(json!("./Cell"), "a")]),
                second,
            ],
        };

        let records = aggregate_module_usage(&report, &ModuleFilter::default(), false);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry, "./src/Cell.js");
        assert_eq!(records[0].exports, json!(true));
        assert_eq!(records[0].count, 2);
    }

    #[test]
    fn test_non_string_requests_are_skipped() {
        let report = ModuleReport {
            modules: vec![module(
                "./src/Header.js",
                vec![
                    reason(Value::Null, "x"),
                    reason(json!(42), "y"),
                    reason(json!("./Header"), "z"),
                ],
            )],
        };

        let records = aggregate_module_usage(&report, &ModuleFilter::default(), false);
        assert_eq!(requests(&records), vec![("./Header", 1)]);
        assert_eq!(records[0].issuers, vec![Some("z".to_string())]);
    }

    #[test]
    fn test_name_filter() {
        let report = ModuleReport {
            modules: vec![module(
                "m",
                vec![
                    reason(json!("./Cell"), "a"),
                    reason(json!("./Footer"), "b"),
                    reason(json!("./Header"), "c"),
                ],
            )],
        };
        let filter = ModuleFilter::new(vec!["Cell".into(), "Header".into()]);

        let records = aggregate_module_usage(&report, &filter, false);
        assert_eq!(requests(&records), vec![("./Cell", 1), ("./Header", 1)]);
    }

    #[test]
    fn test_sort_descending() {
        let report = ModuleReport {
            modules: vec![module(
                "m",
                vec![
                    reason(json!("one"), "a"),
                    reason(json!("three"), "a"),
                    reason(json!("three"), "b"),
                    reason(json!("three"), "c"),
                    reason(json!("two"), "a"),
                    reason(json!("two"), "b"),
                ],
            )],
        };

        let unsorted = aggregate_module_usage(&report, &ModuleFilter::default(), false);
        assert_eq!(requests(&unsorted), vec![("one", 1), ("three", 3), ("two", 2)]);

        let sorted = aggregate_module_usage(&report, &ModuleFilter::default(), true);
        assert_eq!(requests(&sorted), vec![("three", 3), ("two", 2), ("one", 1)]);
    }

    #[test]
    fn test_sort_keeps_ties_in_insertion_order() {
        let report = ModuleReport {
            modules: vec![module(
                "m",
                vec![
                    reason(json!("b"), "x"),
                    reason(json!("a"), "x"),
                    reason(json!("c"), "x"),
                    reason(json!("c"), "y"),
                    reason(json!("d"), "x"),
                ],
            )],
        };

        let sorted = aggregate_module_usage(&report, &ModuleFilter::default(), true);
        assert_eq!(
            requests(&sorted),
            vec![("c", 2), ("b", 1), ("a", 1), ("d", 1)]
        );
    }

    #[test]
    fn test_load_report_with_missing_fields() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("stats.json");
        fs::write(
            &path,
            r#"{
  "modules": [
    {
      "name": "./src/Cell.js",
      "usedExports": ["default"],
      "reasons": [
        { "userRequest": "./Cell", "moduleName": "./src/Table.js" },
        { "userRequest": "./Cell", "moduleName": null },
        { "moduleName": "./src/Broken.js" }
      ]
    },
    { "name": "./src/empty.js" }
  ]
}"#,
        )
        .unwrap();

        let report = load_module_report(&path).unwrap();
        assert_eq!(report.modules.len(), 2);
        assert!(report.modules[1].reasons.is_empty());

        let records = aggregate_module_usage(&report, &ModuleFilter::default(), true);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].count, 2);
        assert_eq!(
            records[0].issuers,
            vec![Some("./src/Table.js".to_string()), None]
        );
        assert_eq!(records[0].exports, json!(["default"]));
    }

    #[test]
    fn test_load_report_errors() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            load_module_report(temp.path().join("missing.json")),
            Err(UistatError::ReportRead { .. })
        ));

        let path = temp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_module_report(&path),
            Err(UistatError::ReportParse { .. })
        ));
    }

    #[test]
    fn test_usage_report_json_shape() {
        let report = ModuleUsageReport {
            timestamp: Utc::now(),
            module_stats: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("moduleStats").is_some());
        assert!(json.get("timestamp").is_some());
    }
}
