/// Fence languages we know how to run, and the program that runs them.
///
/// Lookup is an exact, case-sensitive match on the fence's language tag.
const INTERPRETERS: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("sh", "bash"),
    ("fish", "fish"),
    ("nushell", "nu"),
    ("nu", "nu"),
];

/// The interpreter program for a fence language, if it has one.
pub fn interpreter_for(language: &str) -> Option<&'static str> {
    INTERPRETERS
        .iter()
        .find(|(tag, _)| *tag == language)
        .map(|(_, program)| *program)
}

/// Every language tag with an interpreter, in table order.
pub fn supported_languages() -> Vec<&'static str> {
    INTERPRETERS.iter().map(|(tag, _)| *tag).collect()
}
