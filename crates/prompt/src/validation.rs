//! Prompt rubrics.
//!
//! Two levels of checking:
//! - [`validate_structure`]: the gate run before every push. Required keys,
//!   a non-empty system prompt without `[TODO]`, and at least two declared
//!   techniques.
//! - [`validate_content`]: a stricter review of the prompt text (persona,
//!   output format, few-shot examples, placeholders) that also includes the
//!   structural gate.
//!
//! Every check runs; nothing short-circuits.

use crate::types::PromptRecord;
use promptsync_core::{AppError, AppResult};
use std::fmt;

/// Keys that must be present in a record.
pub const REQUIRED_FIELDS: [&str; 3] = ["description", "system_prompt", "version"];

/// Marker left in unfinished prompts.
pub const TODO_MARKER: &str = "[TODO]";

/// Placeholder the user template must contain.
pub const PLACEHOLDER: &str = "{bug_report}";

pub const MIN_TECHNIQUES: usize = 2;
pub const MIN_EXAMPLES: usize = 2;

/// Phrases that establish a persona.
pub const ROLE_KEYWORDS: &[&str] = &[
    "você é",
    "voce é",
    "você é um",
    "product manager",
    "agile coach",
    "senior",
    "especialista",
];

/// Phrases that ask for User Story / Markdown / Given-When-Then output.
pub const FORMAT_KEYWORDS: &[&str] = &[
    "como um",
    "eu quero",
    "para que",
    "user story",
    "markdown",
    "given-when-then",
    "dado-quando-então",
    "critérios de aceitação",
    "dado que",
];

/// Words that signal input/output examples.
pub const EXAMPLE_INDICATORS: &[&str] = &[
    "exemplo",
    "example",
    "entrada",
    "saída",
    "bug report",
    "few-shot",
];

/// Word counted to enforce the minimum number of examples.
pub const EXAMPLE_WORD: &str = "exemplo";

/// Outcome of the structural rubric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations in rule order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `Ok` when valid, otherwise `AppError::Validation` with every violation.
    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Run the structural rubric.
pub fn validate_structure(record: &PromptRecord) -> ValidationReport {
    let mut errors = Vec::new();

    let present = [
        record.description.is_some(),
        record.system_prompt.is_some(),
        record.version.is_some(),
    ];
    for (field, present) in REQUIRED_FIELDS.iter().zip(present) {
        if !present {
            errors.push(format!("Missing required field: {}", field));
        }
    }

    let system_prompt = record.system_prompt().trim();
    if system_prompt.is_empty() {
        errors.push("system_prompt is empty".to_string());
    }

    if system_prompt.contains(TODO_MARKER) {
        errors.push(format!("system_prompt still contains {}", TODO_MARKER));
    }

    let techniques = record.techniques_applied.len();
    if techniques < MIN_TECHNIQUES {
        errors.push(format!(
            "At least {} techniques required in techniques_applied, found {}",
            MIN_TECHNIQUES, techniques
        ));
    }

    ValidationReport { errors }
}

/// Individual checks of the content rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCheck {
    RoleDefinition,
    OutputFormat,
    ExampleIndicators,
    ExampleCount,
    NoTodoMarkers,
    UserPromptPlaceholder,
    Structure,
}

impl ContentCheck {
    pub const ALL: [ContentCheck; 7] = [
        Self::RoleDefinition,
        Self::OutputFormat,
        Self::ExampleIndicators,
        Self::ExampleCount,
        Self::NoTodoMarkers,
        Self::UserPromptPlaceholder,
        Self::Structure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::RoleDefinition => "role-definition",
            Self::OutputFormat => "output-format",
            Self::ExampleIndicators => "example-indicators",
            Self::ExampleCount => "example-count",
            Self::NoTodoMarkers => "no-todo-markers",
            Self::UserPromptPlaceholder => "user-prompt-placeholder",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for ContentCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one content check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: ContentCheck,
    pub passed: bool,
    /// Explanation; set for failures
    pub message: Option<String>,
}

/// Outcome of the content rubric, one entry per [`ContentCheck`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl ContentReport {
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn passed(&self, check: ContentCheck) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.check == check && o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Run the content rubric.
pub fn validate_content(record: &PromptRecord) -> ContentReport {
    let system_prompt = record.system_prompt();
    let lower = system_prompt.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| lower.contains(kw));

    let mut outcomes = Vec::with_capacity(ContentCheck::ALL.len());
    let mut record_outcome = |check, passed, message: String| {
        outcomes.push(CheckOutcome {
            check,
            passed,
            message: (!passed).then_some(message),
        });
    };

    record_outcome(
        ContentCheck::RoleDefinition,
        contains_any(ROLE_KEYWORDS),
        "The prompt does not define a persona (e.g. 'Você é um Product Manager')".to_string(),
    );

    record_outcome(
        ContentCheck::OutputFormat,
        contains_any(FORMAT_KEYWORDS),
        "The prompt does not ask for a User Story format ('Como um... eu quero... para que...') \
         or acceptance criteria"
            .to_string(),
    );

    record_outcome(
        ContentCheck::ExampleIndicators,
        contains_any(EXAMPLE_INDICATORS),
        "The prompt contains no input/output examples (few-shot)".to_string(),
    );

    let example_count = lower.matches(EXAMPLE_WORD).count();
    record_outcome(
        ContentCheck::ExampleCount,
        example_count >= MIN_EXAMPLES,
        format!(
            "Found {} example(s); at least {} are required",
            example_count, MIN_EXAMPLES
        ),
    );

    record_outcome(
        ContentCheck::NoTodoMarkers,
        !system_prompt.contains(TODO_MARKER) && !lower.contains(&TODO_MARKER.to_lowercase()),
        format!("The prompt still contains {} markers", TODO_MARKER),
    );

    record_outcome(
        ContentCheck::UserPromptPlaceholder,
        record
            .user_prompt()
            .is_some_and(|user| user.contains(PLACEHOLDER)),
        format!("user_prompt must contain {}", PLACEHOLDER),
    );

    let structure = validate_structure(record);
    record_outcome(
        ContentCheck::Structure,
        structure.is_valid(),
        format!("Invalid structure: {}", structure.errors().join("; ")),
    );

    ContentReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> PromptRecord {
        PromptRecord {
            description: Some("Optimized".to_string()),
            system_prompt: Some("Você é um Product Manager.".to_string()),
            user_prompt: Some(PLACEHOLDER.to_string()),
            version: Some("v2".to_string()),
            created_at: None,
            tags: Vec::new(),
            techniques_applied: vec!["few-shot".to_string(), "role-prompting".to_string()],
        }
    }

    #[test]
    fn test_valid_record_passes() {
        let report = validate_structure(&valid_record());
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut record = valid_record();
        record.description = None;
        record.version = None;

        let report = validate_structure(&record);
        assert_eq!(
            report.errors(),
            &[
                "Missing required field: description".to_string(),
                "Missing required field: version".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_system_prompt_also_reports_empty() {
        let mut record = valid_record();
        record.system_prompt = None;

        let report = validate_structure(&record);
        assert_eq!(report.errors()[0], "Missing required field: system_prompt");
        assert_eq!(report.errors()[1], "system_prompt is empty");
        assert_eq!(report.errors().len(), 2);
    }

    #[test]
    fn test_blank_system_prompt_fails() {
        for blank in ["", "   ", "\n\t "] {
            let mut record = valid_record();
            record.system_prompt = Some(blank.to_string());
            let report = validate_structure(&record);
            assert_eq!(report.errors(), &["system_prompt is empty".to_string()]);
        }
    }

    #[test]
    fn test_todo_marker_fails() {
        let mut record = valid_record();
        record.system_prompt = Some("Você é um PM. [TODO] add examples".to_string());
        let report = validate_structure(&record);
        assert_eq!(
            report.errors(),
            &["system_prompt still contains [TODO]".to_string()]
        );
    }

    #[test]
    fn test_technique_minimum() {
        for count in 0..=3 {
            let mut record = valid_record();
            record.techniques_applied = (0..count).map(|i| format!("t{}", i)).collect();
            assert_eq!(validate_structure(&record).is_valid(), count >= MIN_TECHNIQUES);
        }
    }

    #[test]
    fn test_errors_are_collected() {
        let record = PromptRecord::default();
        let err = validate_structure(&record).into_result().unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 5),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_content_rubric_passes_reference_text() {
        let record = PromptRecord {
            system_prompt: Some(
                "Você é um Product Manager. Como um usuário eu quero... Exemplo 1: ... Exemplo 2: ..."
                    .to_string(),
            ),
            user_prompt: Some("{bug_report}".to_string()),
            ..Default::default()
        };

        let report = validate_content(&record);
        for check in [
            ContentCheck::RoleDefinition,
            ContentCheck::OutputFormat,
            ContentCheck::ExampleIndicators,
            ContentCheck::ExampleCount,
            ContentCheck::NoTodoMarkers,
            ContentCheck::UserPromptPlaceholder,
        ] {
            assert!(report.passed(check), "{} failed", check);
        }
        // No description/version/techniques declared
        assert!(!report.passed(ContentCheck::Structure));
    }

    #[test]
    fn test_single_example_fails_count_only() {
        let record = PromptRecord {
            system_prompt: Some(
                "Você é um Product Manager. Como um usuário eu quero... Exemplo 1: ...".to_string(),
            ),
            user_prompt: Some("{bug_report}".to_string()),
            ..Default::default()
        };

        let report = validate_content(&record);
        assert!(report.passed(ContentCheck::ExampleIndicators));
        assert!(!report.passed(ContentCheck::ExampleCount));
        let failure = report
            .failures()
            .find(|o| o.check == ContentCheck::ExampleCount)
            .unwrap();
        assert_eq!(
            failure.message.as_deref(),
            Some("Found 1 example(s); at least 2 are required")
        );
    }

    #[test]
    fn test_lowercase_todo_fails_content_rubric() {
        let mut record = valid_record();
        record.system_prompt = Some("Você é um PM. [todo] finish".to_string());
        let report = validate_content(&record);
        assert!(!report.passed(ContentCheck::NoTodoMarkers));
        // The structural gate only looks for the upper-case marker
        assert!(validate_structure(&record).is_valid());
    }

    #[test]
    fn test_missing_placeholder_fails() {
        let mut record = valid_record();
        record.user_prompt = Some("Bug: <report>".to_string());
        assert!(!validate_content(&record).passed(ContentCheck::UserPromptPlaceholder));

        record.user_prompt = None;
        assert!(!validate_content(&record).passed(ContentCheck::UserPromptPlaceholder));
    }

    #[test]
    fn test_report_covers_every_check() {
        let report = validate_content(&valid_record());
        let checks: Vec<_> = report.outcomes.iter().map(|o| o.check).collect();
        assert_eq!(checks, ContentCheck::ALL.to_vec());
    }
}
