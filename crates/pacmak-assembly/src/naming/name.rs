/// A name broken into words, independent of any casing convention.
///
/// Assembly identifiers arrive as camelCase, PascalCase, kebab-case or
/// snake_case. Splitting them into words once lets every target convention
/// be derived from the same source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub words: Vec<String>,
}

impl Name {
    /// Parse a Name from a string (kebab-case, snake_case, camelCase, etc)
    ///
    /// Acronym runs stay together: `HTTPServer` splits into `HTTP` and
    /// `Server`, `v2Beta` into `v2` and `Beta`.
    pub fn from(name: &str) -> Self {
        let chars: Vec<char> = name.chars().collect();
        let mut words = Vec::new();
        let mut current_word = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if is_separator(c) {
                if !current_word.is_empty() {
                    words.push(std::mem::take(&mut current_word));
                }
                continue;
            }

            if c.is_uppercase() && !current_word.is_empty() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary {
                    words.push(std::mem::take(&mut current_word));
                }
            }
            current_word.push(c);
        }
        if !current_word.is_empty() {
            words.push(current_word);
        }

        Name { words }
    }

    pub fn to_snake_case(&self) -> String {
        self.words.join("_").to_lowercase()
    }

    pub fn to_screaming_snake_case(&self) -> String {
        self.words.join("_").to_uppercase()
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '/' | '.' | ':') || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("camelCase", "camel_case")]
    #[case("PascalCase", "pascal_case")]
    #[case("kebab-case-name", "kebab_case_name")]
    #[case("already_snake", "already_snake")]
    #[case("HTTPServer", "http_server")]
    #[case("parseURL", "parse_url")]
    #[case("v2Beta", "v2_beta")]
    #[case("value2", "value2")]
    #[case("jsii-calc", "jsii_calc")]
    fn test_snake_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Name::from(input).to_snake_case(), expected);
    }

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(
            Name::from("staticProperty").to_screaming_snake_case(),
            "STATIC_PROPERTY"
        );
    }

    #[test]
    fn test_separators_are_dropped() {
        let name = Name::from("--a__b//c");
        assert_eq!(name.words, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_name() {
        assert!(Name::from("").words.is_empty());
        assert!(Name::from("__").words.is_empty());
    }
}
