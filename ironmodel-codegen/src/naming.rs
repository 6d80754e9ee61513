//! Identifier helpers.

/// Converts a schema name or literal to PascalCase.
///
/// `_`, `-`, `.`, `/` and spaces separate words; the first letter of each
/// word is upper-cased and the rest kept as written.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if matches!(c, '_' | '-' | '.' | '/' | ' ') {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Name of the interface generated for a record.
#[must_use]
pub fn interface_name(record_name: &str) -> String {
    format!("I{record_name}")
}

/// Name of the equality comparer generated for a record.
#[must_use]
pub fn comparer_name(record_name: &str) -> String {
    format!("{record_name}EqualityComparer")
}

/// Name of the visit method for a record.
#[must_use]
pub fn visit_method_name(record_name: &str) -> String {
    format!("Visit{record_name}")
}

/// Synthetic descriptor key for the element layer below `key`.
#[must_use]
pub fn element_key(key: &str) -> String {
    format!("{key}[]")
}

/// Synthetic descriptor key for the value layer below `key`.
#[must_use]
pub fn value_key(key: &str) -> String {
    format!("{key}{{}}")
}
