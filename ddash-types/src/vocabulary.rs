use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/** A closed set of values accepted by an enum-typed column. The
 * stored representation of a variant is exactly its `AsRef<str>`
 * text, and parsing is the exact inverse. */
pub trait Vocabulary:
    Copy
    + IntoEnumIterator
    + Into<&'static str>
    + AsRef<str>
    + std::str::FromStr
    + std::fmt::Display
{
    /** Name of the column holding this vocabulary, for error reports. */
    const FIELD: &'static str;

    /** The stored representation. */
    fn as_str(self) -> &'static str {
        self.into()
    }

    /** Every accepted value, in declaration order. */
    fn choices() -> Vec<&'static str> {
        Self::iter().map(Self::as_str).collect()
    }
}

/** Outcome of a single build of either the library or its test suite. */
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BuildStatus {
    #[default]
    Ok,
    Failed,
}

impl Vocabulary for BuildStatus {
    const FIELD: &'static str = "build status";
}

/** Overall status of a test-suite execution. */
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TestRunStatus {
    Ok,
    Failed,
    Crashed,
    #[default]
    NotRun,
}

impl Vocabulary for TestRunStatus {
    const FIELD: &'static str = "test run status";
}

/** Outcome of one individual test. */
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TestResultStatus {
    Passed,
    Failed,
    Skipped,
    Crashed,
    Hung,
    #[default]
    NoStatus,
}

impl TestResultStatus {
    /** Whether a test in this state counts as broken when it used to pass. */
    pub fn is_failing(self) -> bool {
        matches!(self, Self::Failed | Self::Crashed | Self::Hung)
    }
}

impl Vocabulary for TestResultStatus {
    const FIELD: &'static str = "test result status";
}

/** The ways the test suite can drive a mutatee. */
#[derive(
    Copy,
    Clone,
    Debug,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TestModeName {
    Create,
    Attach,
    Rewriter,
    Deserialize,
}

impl Vocabulary for TestModeName {
    const FIELD: &'static str = "test mode";
}

#[derive(
    Copy,
    Clone,
    Debug,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum Language {
    C,
    #[serde(rename = "C++")]
    #[strum(serialize = "C++")]
    Cxx,
    Fortran,
}

impl Vocabulary for Language {
    const FIELD: &'static str = "language";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stored_representation() {
        assert_eq!(BuildStatus::default().as_ref(), "OK");
        assert_eq!(TestRunStatus::default().as_ref(), "NOTRUN");
        assert_eq!(TestResultStatus::default().as_ref(), "NOSTATUS");
    }

    #[test]
    fn choices_are_exhaustive() {
        assert_eq!(BuildStatus::choices(), ["OK", "FAILED"]);
        assert_eq!(
            TestRunStatus::choices(),
            ["OK", "FAILED", "CRASHED", "NOTRUN"]
        );
        assert_eq!(
            TestResultStatus::choices(),
            ["PASSED", "FAILED", "SKIPPED", "CRASHED", "HUNG", "NOSTATUS"]
        );
        assert_eq!(
            TestModeName::choices(),
            ["create", "attach", "rewriter", "deserialize"]
        );
        assert_eq!(Language::choices(), ["C", "C++", "Fortran"]);
    }

    #[test]
    fn parsing_is_exact() {
        assert_eq!("C++".parse::<Language>(), Ok(Language::Cxx));
        assert_eq!("NOTRUN".parse::<TestRunStatus>(), Ok(TestRunStatus::NotRun));
        assert!("notrun".parse::<TestRunStatus>().is_err());
        assert!("c++".parse::<Language>().is_err());
        assert!("detach".parse::<TestModeName>().is_err());
    }

    #[test]
    fn serde_agrees_with_strum() {
        for status in TestResultStatus::iter() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_ref()));
        }
        let lang: Language = serde_json::from_str("\"C++\"").unwrap();
        assert_eq!(lang, Language::Cxx);
    }

    #[test]
    fn failing_statuses() {
        assert!(TestResultStatus::Crashed.is_failing());
        assert!(TestResultStatus::Hung.is_failing());
        assert!(!TestResultStatus::Skipped.is_failing());
        assert!(!TestResultStatus::NoStatus.is_failing());
    }
}
