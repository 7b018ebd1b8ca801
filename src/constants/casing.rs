use serde::{Deserialize, Serialize};

/// How generated identifiers are spelled.
///
/// Parsing ignores case, dashes and underscores, so `"camel"`, `"camelCase"`
/// and `"CAMEL_CASE"` are the same. Unknown names mean [`Casing::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Casing {
    /// Keep the spreadsheet spelling.
    None,
    /// `signInScreen`
    Camel,
    /// `SignInScreen`
    Pascal,
    /// `sign_in_screen`
    Snake,
    /// `SIGN_IN_SCREEN`
    Caps,
}

impl Casing {
    pub fn apply(&self, name: &str) -> String {
        let words = split_words(name);
        match self {
            Casing::None => name.to_string(),
            Casing::Camel => words
                .iter()
                .enumerate()
                .map(|(index, word)| {
                    if index == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
            Casing::Pascal => words.iter().map(|word| capitalize(word)).collect(),
            Casing::Snake => words
                .iter()
                .map(|word| word.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            Casing::Caps => words
                .iter()
                .map(|word| word.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

impl From<String> for Casing {
    fn from(value: String) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "camel" | "camelcase" => Casing::Camel,
            "pascal" | "pascalcase" => Casing::Pascal,
            "snake" | "snakecase" => Casing::Snake,
            "caps" => Casing::Caps,
            _ => Casing::None,
        }
    }
}

impl From<Casing> for String {
    fn from(value: Casing) -> Self {
        match value {
            Casing::None => "none",
            Casing::Camel => "camel",
            Casing::Pascal => "pascal",
            Casing::Snake => "snake",
            Casing::Caps => "caps",
        }
        .to_string()
    }
}

/// Splits on anything that is not a letter or digit, and before an uppercase
/// letter that follows a lowercase letter or digit.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut after_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            after_lower = false;
            continue;
        }
        if c.is_uppercase() && after_lower {
            words.push(std::mem::take(&mut current));
        }
        after_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
