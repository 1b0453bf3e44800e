/// Short descriptions of the engines a report may contain.
pub const ENGINE_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "cpd",
        "Copy-Paste Detector: Finds duplicate code blocks in Apex and other supported languages.",
    ),
    (
        "eslint",
        "Analyzes JavaScript and Lightning Web Components for code quality and style issues.",
    ),
    (
        "flow",
        "Analyzes Salesforce Flows for best practices, security, and maintainability issues.",
    ),
    (
        "pmd",
        "Performs static analysis on Apex, Visualforce. Includes the PMD AppExchange rules.",
    ),
    (
        "regex",
        "Detects code patterns using regular expressions. Useful for enforcing simple, custom rules.",
    ),
    (
        "retirejs",
        "Scans JavaScript libraries for known security vulnerabilities.",
    ),
    (
        "sfge",
        "Salesforce Graph Engine: Advanced static analysis for security, CRUD/FLS, and data flow in Apex.",
    ),
];

/// Description for `engine`, or `""` if the engine is not known.
#[must_use]
pub fn engine_description(engine: &str) -> &'static str {
    ENGINE_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == engine)
        .map_or("", |(_, desc)| desc)
}
