//! Muscle name normalization

/// Muscles the exercise catalog recognises (lowercase)
pub const KNOWN_MUSCLES: &[&str] = &[
    "back",
    "chest",
    "shoulders",
    "biceps",
    "triceps",
    "quads",
    "hamstrings",
    "calves",
    "abs",
    "glutes",
];

/// Synonym -> canonical muscle (both lowercase)
const MUSCLE_SYNONYMS: &[(&str, &str)] = &[
    ("lats", "back"),
    ("lat", "back"),
    ("rear delts", "shoulders"),
    ("delts", "shoulders"),
    ("core", "abs"),
    ("bovenste borst", "chest"),
    ("onderste borst", "chest"),
];

/// Values used in place of a muscle when a slot is unused
const PLACEHOLDERS: &[&str] = &["-", "—", "n/a", "none"];

/// Case-normalize a muscle name: "chEST" -> "Chest".
///
/// Returns `None` for blanks and placeholders like "-".
pub fn normalize_muscle_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }
    Some(capitalize(trimmed))
}

/// Normalize a catalog muscle list: map synonyms, keep known muscles,
/// drop duplicates (first position wins), title-case the result.
pub fn normalize_muscle_list<S: AsRef<str>>(muscles: &[S]) -> Vec<String> {
    let mut seen: Vec<&'static str> = Vec::new();
    let mut result = Vec::new();

    for raw in muscles {
        let key = raw.as_ref().trim().to_lowercase();
        let Some(canonical) = canonical_muscle(&key) else {
            continue;
        };
        if !seen.contains(&canonical) {
            seen.push(canonical);
            result.push(capitalize(canonical));
        }
    }

    result
}

fn canonical_muscle(key: &str) -> Option<&'static str> {
    let key = MUSCLE_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, target)| *target)
        .unwrap_or(key);
    KNOWN_MUSCLES.iter().find(|m| **m == key).copied()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
