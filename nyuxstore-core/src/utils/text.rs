// File: nyuxstore-core/src/utils/text.rs

/// Title-cases a name the way the store normalizes games and categories:
/// every letter that follows a non-letter is upper-cased, the rest are
/// lowered. Leading and trailing whitespace is stripped.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut boundary = true;
    for c in input.trim().chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            boundary = true;
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("forza horizon 5"), "Forza Horizon 5");
        assert_eq!(title_case("  CALL of DUTY  "), "Call Of Duty");
    }

    #[test]
    fn capitalizes_after_punctuation_like_the_original() {
        assert_eq!(title_case("rpg/aventura"), "Rpg/Aventura");
    }

    #[test]
    fn keeps_accented_characters() {
        assert_eq!(title_case("simulação"), "Simulação");
        assert_eq!(title_case("ação e aventura"), "Ação E Aventura");
    }
}
