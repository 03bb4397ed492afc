//! Table-name inflection
//!
//! Pure functions deriving a table name from an entity type name.
//! No I/O: the same input always produces the same output.

/// Derive the conventional table name for an entity type name
///
/// The type name is snake_cased, then the final word is pluralized:
/// `Student` -> `students`, `CostumeStore` -> `costume_stores`.
pub fn table_name_for(type_name: &str) -> String {
    pluralize(&snake_case(type_name))
}

/// Convert a CamelCase type name to snake_case
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Pluralize a lowercase word using regular English rules
///
/// Handles s/x/z/ch/sh -> es, consonant-y -> ies, and f/fe -> ves.
/// Irregular nouns (person, mouse, ...) are not recognized; entity types
/// with irregular plurals must set an explicit table-name override.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if let Some(stem) = word.strip_suffix('y') {
        if !stem.is_empty() && !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }

    for suffix in ["s", "x", "z", "ch", "sh"] {
        if word.ends_with(suffix) {
            return format!("{word}es");
        }
    }

    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{stem}ves");
    }
    if let Some(stem) = word.strip_suffix('f') {
        return format!("{stem}ves");
    }

    format!("{word}s")
}
