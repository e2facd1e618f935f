//! Built-in sample cases for both routines, runnable from the CLI.

use std::fmt;

use itertools::Itertools;
use tracing::{info, instrument};

use crate::domain::{remove_instances, render, DomainError, Node};

/// Expected result of a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Markup(Vec<String>),
    Text(String),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Markup(lines) => write!(f, "{}", lines.iter().join(",")),
            Expected::Text(text) => write!(f, "{text}"),
        }
    }
}

#[derive(Debug, Clone)]
enum Input {
    Render(Node),
    Strip {
        original: &'static str,
        instances: &'static [&'static str],
    },
}

/// A named input with its expected result.
#[derive(Debug, Clone)]
pub struct SampleCase {
    pub name: &'static str,
    input: Input,
    pub expected: Expected,
}

impl SampleCase {
    fn render(name: &'static str, root: Node, expected: &[&str]) -> Self {
        Self {
            name,
            input: Input::Render(root),
            expected: Expected::Markup(expected.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn strip(
        name: &'static str,
        original: &'static str,
        instances: &'static [&'static str],
        expected: &str,
    ) -> Self {
        Self {
            name,
            input: Input::Strip {
                original,
                instances,
            },
            expected: Expected::Text(expected.to_string()),
        }
    }

    pub fn run(&self) -> Result<Expected, DomainError> {
        match &self.input {
            Input::Render(root) => render(root).map(Expected::Markup),
            Input::Strip {
                original,
                instances,
            } => remove_instances(original, *instances).map(Expected::Text),
        }
    }
}

/// Result of running one sample.
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    /// 1-based position in the suite
    pub number: usize,
    pub name: &'static str,
    pub expected: Expected,
    pub actual: Result<Expected, DomainError>,
}

impl SampleOutcome {
    pub fn passed(&self) -> bool {
        matches!(&self.actual, Ok(actual) if *actual == self.expected)
    }
}

/// The fixed sample suite.
pub fn sample_cases() -> Vec<SampleCase> {
    vec![
        SampleCase::render(
            "render nested html document",
            Node::branch(
                "html",
                vec![Node::branch(
                    "div",
                    vec![Node::leaf("p", "hello world"), Node::leaf("p", "hello world")],
                )],
            ),
            &[
                "<html>",
                "<div>",
                "<p> hello world </p>",
                "<p> hello world </p>",
                "</div>",
                "</html>",
            ],
        ),
        SampleCase::render("render single leaf", Node::leaf("p", "x"), &["<p> x </p>"]),
        SampleCase::strip(
            "strip keeps substrings not in original",
            "absdefge",
            &["ab", "fg", "ee"],
            "sdee",
        ),
        SampleCase::strip(
            "strip triple character instances",
            "absdfgeee",
            &["ab", "fg", "eee"],
            "sd",
        ),
        SampleCase::strip(
            "strip duplicate instances",
            "absfgdefge",
            &["ab", "fg", "ee"],
            "sdee",
        ),
    ]
}

/// Runs the sample suite in order.
#[instrument(level = "debug")]
pub fn run_samples() -> Vec<SampleOutcome> {
    let outcomes: Vec<_> = sample_cases()
        .into_iter()
        .enumerate()
        .map(|(idx, case)| SampleOutcome {
            number: idx + 1,
            name: case.name,
            actual: case.run(),
            expected: case.expected,
        })
        .collect();

    let passed = outcomes.iter().filter(|o| o.passed()).count();
    info!(passed, total = outcomes.len(), "samples finished");
    outcomes
}
