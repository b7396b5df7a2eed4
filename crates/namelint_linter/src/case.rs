//! Identifier re-casing.
//!
//! Words are found the way the `change-case` family of libraries finds them:
//! a boundary sits between a lowercase letter and an uppercase letter
//! (`fooBar`), between digits and a capital that starts a word (`v2Api`,
//! but not `MAX_2D`), and before the last capital of an acronym that starts
//! a new word (`XMLHttp`). Every run of characters that are not letters or
//! digits separates words and is dropped.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// A naming case style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseFormat {
    /// Accepts any name.
    None,
    CamelCase,
    PascalCase,
    ConstantCase,
    SnakeCase,
}

impl CaseFormat {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::CamelCase,
        Self::PascalCase,
        Self::ConstantCase,
        Self::SnakeCase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CamelCase => "camel-case",
            Self::PascalCase => "pascal-case",
            Self::ConstantCase => "constant-case",
            Self::SnakeCase => "snake-case",
        }
    }
}

impl fmt::Display for CaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or(())
    }
}

/// Part of a name kept verbatim in front of the re-cased remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrefixMode<'a> {
    #[default]
    None,
    /// Keep any run of leading `_`.
    LeadingUnderscore,
    /// Keep the first listed prefix the name starts with.
    Allowed(&'a [String]),
}

/// Re-cases `text` into `format`.
pub fn transform(format: CaseFormat, text: &str, prefix: PrefixMode) -> String {
    if format == CaseFormat::None {
        return text.to_string();
    }

    let (kept, rest) = match prefix {
        PrefixMode::None => ("", text),
        PrefixMode::LeadingUnderscore => {
            let rest = text.trim_start_matches('_');
            (&text[..text.len() - rest.len()], rest)
        }
        PrefixMode::Allowed(prefixes) => prefixes
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix.as_str()).map(|rest| (prefix.as_str(), rest)))
            .unwrap_or(("", text)),
    };

    let words = split_words(rest);
    let cased = match format {
        CaseFormat::None => rest.to_string(),
        CaseFormat::CamelCase => words
            .iter()
            .enumerate()
            .map(|(index, word)| {
                if index == 0 {
                    word.to_lowercase()
                } else {
                    pascal_word(word, index)
                }
            })
            .collect(),
        CaseFormat::PascalCase => words
            .iter()
            .enumerate()
            .map(|(index, word)| pascal_word(word, index))
            .collect(),
        CaseFormat::ConstantCase => words
            .iter()
            .map(|word| word.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
        CaseFormat::SnakeCase => words
            .iter()
            .map(|word| word.to_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
    };

    format!("{kept}{cased}")
}

/// Whether re-casing `text` leaves it unchanged.
pub fn is_correct_format(format: CaseFormat, text: &str, prefix: PrefixMode) -> bool {
    transform(format, text, prefix) == text
}

/// First letter upper, rest lower. A word after the first that starts with
/// a digit gets a `_` so it stays apart from the previous word.
fn pascal_word(word: &str, index: usize) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str().to_lowercase();
    if index > 0 && first.is_ascii_digit() {
        format!("_{first}{rest}")
    } else {
        format!("{}{rest}", first.to_uppercase())
    }
}

fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut boundaries = vec![false; chars.len()];

    // lower followed by upper: `fooBar`. After digits only when the digits
    // close a lowercase run (`v2Api`) or a capitalized word starts (`_2Count`);
    // `MAX_2D` stays one word.
    for i in 1..chars.len() {
        if !chars[i].is_ascii_uppercase() {
            continue;
        }
        let before_digits = chars[..i].iter().rev().find(|c| !c.is_ascii_digit());
        let starts_word = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
        boundaries[i] = chars[i - 1].is_ascii_lowercase()
            || (chars[i - 1].is_ascii_digit()
                && (starts_word || before_digits.is_some_and(char::is_ascii_lowercase)));
    }
    // upper followed by upper+lower: `XMLHttp` splits before `H`
    let mut i = 0;
    while i + 2 < chars.len() {
        if chars[i].is_ascii_uppercase()
            && chars[i + 1].is_ascii_uppercase()
            && chars[i + 2].is_ascii_lowercase()
        {
            boundaries[i + 1] = true;
            i += 3;
        } else {
            i += 1;
        }
    }

    let mut words = Vec::new();
    let mut current = String::new();
    for (c, boundary) in chars.into_iter().zip(boundaries) {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cased(format: CaseFormat, text: &str) -> String {
        transform(format, text, PrefixMode::None)
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("fooBar"), vec!["foo", "Bar"]);
        assert_eq!(split_words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(split_words("__foo--bar__"), vec!["foo", "bar"]);
        assert_eq!(split_words("version2Api"), vec!["version2", "Api"]);
        assert_eq!(split_words("MAX_2D_SIZE"), vec!["MAX", "2D", "SIZE"]);
        assert_eq!(split_words("item_2Count"), vec!["item", "2", "Count"]);
        assert!(split_words("___").is_empty());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(cased(CaseFormat::CamelCase, "do_thing"), "doThing");
        assert_eq!(cased(CaseFormat::CamelCase, "DoThing"), "doThing");
        assert_eq!(cased(CaseFormat::CamelCase, "XMLHttpRequest"), "xmlHttpRequest");
        assert_eq!(cased(CaseFormat::CamelCase, "_private"), "private");
        assert_eq!(cased(CaseFormat::CamelCase, "item_2_count"), "item_2Count");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(cased(CaseFormat::PascalCase, "render"), "Render");
        assert_eq!(cased(CaseFormat::PascalCase, "Render_Bad"), "RenderBad");
        assert_eq!(cased(CaseFormat::PascalCase, "IDSet"), "IdSet");
    }

    #[test]
    fn test_constant_and_snake_case() {
        assert_eq!(cased(CaseFormat::ConstantCase, "maxSize"), "MAX_SIZE");
        assert_eq!(cased(CaseFormat::ConstantCase, "MAX_SIZE"), "MAX_SIZE");
        assert_eq!(cased(CaseFormat::ConstantCase, "max_2d_size"), "MAX_2D_SIZE");
        assert_eq!(cased(CaseFormat::ConstantCase, "MAX_2D_SIZE"), "MAX_2D_SIZE");
        assert_eq!(cased(CaseFormat::SnakeCase, "doThing"), "do_thing");
        assert_eq!(cased(CaseFormat::SnakeCase, "HTTPServer"), "http_server");
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(cased(CaseFormat::None, "Any_Name$"), "Any_Name$");
        let prefixes = vec!["$".to_string()];
        assert_eq!(
            transform(CaseFormat::None, "$x_Y", PrefixMode::Allowed(&prefixes)),
            "$x_Y"
        );
    }

    #[test]
    fn test_leading_underscore_is_kept() {
        assert_eq!(
            transform(CaseFormat::CamelCase, "__my_field", PrefixMode::LeadingUnderscore),
            "__myField"
        );
        assert_eq!(
            transform(CaseFormat::ConstantCase, "_maxSize", PrefixMode::LeadingUnderscore),
            "_MAX_SIZE"
        );
        assert!(is_correct_format(
            CaseFormat::CamelCase,
            "_value",
            PrefixMode::LeadingUnderscore
        ));
        assert!(!is_correct_format(CaseFormat::CamelCase, "_value", PrefixMode::None));
    }

    #[test]
    fn test_allowed_prefix_first_match_wins() {
        let prefixes = vec!["on".to_string(), "$".to_string(), "o".to_string()];
        let mode = PrefixMode::Allowed(&prefixes);
        assert_eq!(transform(CaseFormat::PascalCase, "onclick", mode), "onClick");
        assert_eq!(transform(CaseFormat::CamelCase, "$Store_value", mode), "$storeValue");
        assert_eq!(transform(CaseFormat::CamelCase, "Plain_name", mode), "plainName");
    }

    #[test]
    fn test_prefix_property() {
        let prefixes = vec!["m_".to_string()];
        let samples = ["fooBar", "Foo_bar", "FOO", "x1y", "already_snake"];
        for format in CaseFormat::ALL {
            for rest in samples {
                let prefixed = format!("m_{rest}");
                assert_eq!(
                    transform(format, &prefixed, PrefixMode::Allowed(&prefixes)),
                    format!("m_{}", transform(format, rest, PrefixMode::None)),
                    "{format} {prefixed}"
                );
            }
        }
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "fooBar",
            "FooBar",
            "foo_bar",
            "FOO_BAR",
            "XMLHttpRequest",
            "item2Count",
            "max_2d_size",
            "MAX_2D_SIZE",
            "foo_2x",
            "item_2_count",
            "__proto__",
            "render",
            "a",
            "ÉtéValue",
        ];
        for format in CaseFormat::ALL {
            for sample in samples {
                let once = cased(format, sample);
                assert_eq!(cased(format, &once), once, "{format} {sample}");
                assert!(is_correct_format(format, &once, PrefixMode::None));
            }
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!("snake-case".parse(), Ok(CaseFormat::SnakeCase));
        assert!("kebab-case".parse::<CaseFormat>().is_err());
        assert_eq!(CaseFormat::PascalCase.to_string(), "pascal-case");
    }
}
