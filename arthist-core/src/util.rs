use std::cmp::Ordering;

/// Compare two display names the way a human-facing sorted list expects.
///
/// Letters are compared case- and accent-insensitively first, then accents
/// break ties (unaccented first), then case (lowercase first). This matches
/// the default collation of common locales for Latin-script names.
pub fn compare_locale(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .cmp(b.chars().flat_map(char::to_lowercase).map(fold_diacritic));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a.to_lowercase().cmp(&b.to_lowercase());
    if secondary != Ordering::Equal {
        return secondary;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }
    a.cmp(b)
}

/// Strip the diacritic from a lowercase Latin letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare_locale(a, b));
        v
    }

    #[test]
    fn case_insensitive_first() {
        assert_eq!(
            sorted(&["van Gogh", "Vermeer", "Degas"]),
            vec!["Degas", "van Gogh", "Vermeer"]
        );
    }

    #[test]
    fn accents_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Zurbarán", "Édouard Manet", "Egon Schiele"]),
            vec!["Édouard Manet", "Egon Schiele", "Zurbarán"]
        );
    }

    #[test]
    fn ties_break_on_accent_then_case() {
        assert_eq!(compare_locale("e", "é"), Ordering::Less);
        assert_eq!(compare_locale("a", "A"), Ordering::Less);
        assert_eq!(compare_locale("France", "France"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare_locale("Ital", "Italy"), Ordering::Less);
    }
}
