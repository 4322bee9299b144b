//! Conformance test fixture runner
//!
//! Loads YAML fixtures in the [`TableConfig`] format and runs them against
//! the matcha engine: YAML → `TableConfig<Value, Value>` → `evaluate()`.

use matcha::{MatchError, TableConfig};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub table: TableConfig<Value, Value>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
    /// The table must be rejected by `validate()`.
    #[serde(default)]
    pub expect_error: bool,
}

/// Test case
///
/// Exactly one of `expect` and `expect_miss` is set. `expect: null` expects
/// a rule or fallback that produces `null`, which is not a miss.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub input: Value,
    #[serde(default, deserialize_with = "present")]
    pub expect: Option<Value>,
    /// No rule matches and the table has no fallback.
    #[serde(default)]
    pub expect_miss: bool,
}

impl TestCase {
    /// The outcome this case expects from `TableConfig::evaluate`.
    pub fn expected(&self) -> Option<Value> {
        if self.expect_miss {
            None
        } else {
            self.expect.clone()
        }
    }

    fn is_well_formed(&self) -> bool {
        self.expect_miss != self.expect.is_some()
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Option<Value>,
    pub actual: Result<Option<Value>, MatchError>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Vec<CaseResult> {
        self.cases
            .iter()
            .map(|case| {
                let actual = self.table.evaluate(case.input.clone());
                let expected = case.expected();
                CaseResult {
                    case_name: case.name.clone(),
                    passed: case.is_well_formed() && actual.as_ref().is_ok_and(|a| *a == expected),
                    expected,
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        if self.expect_error {
            assert!(
                self.table.validate().is_err(),
                "Fixture '{}' expected a table error, but the table is valid",
                self.name
            );
            return;
        }

        if let Err(e) = self.table.validate() {
            panic!("Fixture '{}' has an invalid table: {e}", self.name);
        }

        for case in &self.cases {
            assert!(
                case.is_well_formed(),
                "Fixture '{}' case '{}' must set exactly one of `expect` and `expect_miss`",
                self.name,
                case.name
            );
        }

        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
name: parity
description: first-match-wins over plain numbers
table:
  rules:
    - when: { type: equals, value: 0 }
      then: zero
    - when: { type: one_of, values: [2, 4, 6, 8] }
      then: small even
  otherwise: other
cases:
  - name: zero
    input: 0
    expect: zero
  - name: four
    input: 4
    expect: small even
  - name: fallback
    input: 5
    expect: other
"#;

    #[test]
    fn parse_and_run() {
        let fixture = Fixture::from_yaml(FIXTURE).unwrap();
        assert_eq!(fixture.name, "parity");
        assert_eq!(fixture.table.rules.len(), 2);
        assert!(fixture.run().iter().all(|r| r.passed));
        fixture.run_and_assert();
    }

    #[test]
    fn failing_case_reported() {
        let yaml = FIXTURE.replace("expect: zero", "expect: nothing");
        let fixture = Fixture::from_yaml(&yaml).unwrap();
        let results = fixture.run();
        assert!(!results[0].passed);
        assert!(results[1].passed);
    }

    #[test]
    fn multi_document() {
        let yaml = format!("{FIXTURE}\n---\n{FIXTURE}");
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
    }

    #[test]
    fn null_result_differs_from_miss() {
        let yaml = r#"
name: nulls
table:
  rules:
    - when: { type: equals, value: 1 }
      then: null
cases:
  - name: null_hit
    input: 1
    expect: null
  - name: miss
    input: 2
    expect_miss: true
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.cases[0].expected(), Some(Value::Null));
        assert_eq!(fixture.cases[1].expected(), None);
        assert!(fixture.run().iter().all(|r| r.passed));

        let swapped = yaml.replace("expect: null", "expect_miss: true");
        let fixture = Fixture::from_yaml(&swapped).unwrap();
        assert!(!fixture.run()[0].passed);
    }

    #[test]
    #[should_panic(expected = "exactly one of `expect` and `expect_miss`")]
    fn case_without_expectation_rejected() {
        let yaml = FIXTURE.replace("    expect: zero\n", "");
        Fixture::from_yaml(&yaml).unwrap().run_and_assert();
    }
}
