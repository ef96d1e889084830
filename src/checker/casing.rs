/// Letter-case shape of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCasing {
    Lower,
    Upper,
    /// First letter upper, the rest lower, e.g. `Parser`.
    FirstUpper,
    Mixed,
}

impl TextCasing {
    pub fn of(word: &str) -> Self {
        let mut letters = word.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return TextCasing::Mixed;
        };
        let rest: Vec<char> = letters.collect();

        if first.is_lowercase() && rest.iter().all(|c| c.is_lowercase()) {
            TextCasing::Lower
        } else if first.is_uppercase() && rest.iter().all(|c| c.is_uppercase()) {
            if rest.is_empty() {
                TextCasing::FirstUpper
            } else {
                TextCasing::Upper
            }
        } else if first.is_uppercase() && rest.iter().all(|c| c.is_lowercase()) {
            TextCasing::FirstUpper
        } else {
            TextCasing::Mixed
        }
    }

    /// Recase `value` to this shape. `Mixed` leaves the value unchanged.
    pub fn apply(self, value: &str) -> String {
        match self {
            TextCasing::Lower => value.to_lowercase(),
            TextCasing::Upper => value.to_uppercase(),
            TextCasing::FirstUpper => {
                let mut chars = value.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
            TextCasing::Mixed => value.to_string(),
        }
    }
}
