//! Input normalization

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// First word of a cleaned line, or `""` when there is none.
pub fn first_word(words: &[String]) -> &str {
    words.first().map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        let cases = [
            ("  hello  world  ", vec!["hello", "world"]),
            ("Hello WORLD", vec!["hello", "world"]),
            ("   HELLO   world", vec!["hello", "world"]),
            ("catch\tPikachu\n", vec!["catch", "pikachu"]),
            ("", vec![]),
            ("   ", vec![]),
        ];

        for (input, expected) in cases {
            assert_eq!(clean_input(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_first_word() {
        let words = vec!["hello".to_string(), "world".to_string()];
        assert_eq!(first_word(&words), "hello");

        let single = vec!["pokeman".to_string()];
        assert_eq!(first_word(&single), "pokeman");

        assert_eq!(first_word(&[]), "");
    }
}
