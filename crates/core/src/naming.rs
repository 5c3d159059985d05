//! Spreadsheet-style column labels.
//!
//! Column 0 is `A`, 25 is `Z`, 26 is `AA`, and so on (bijective base-26).

/// Convert 0-based column index to Excel-style letter(s).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Parse letter(s) back into a 0-based column index.
/// Case-insensitive; returns None for empty or non-alphabetic input.
pub fn letters_to_col(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}

/// Header labels for the first `count` columns.
pub fn column_headers(count: usize) -> Vec<String> {
    (0..count).map(col_to_letters).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letters() {
        assert_eq!(col_to_letters(0), "A");
        assert_eq!(col_to_letters(1), "B");
        assert_eq!(col_to_letters(25), "Z");
        assert_eq!(col_to_letters(26), "AA");
        assert_eq!(col_to_letters(27), "AB");
        assert_eq!(col_to_letters(701), "ZZ");
        assert_eq!(col_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_to_col() {
        assert_eq!(letters_to_col("A"), Some(0));
        assert_eq!(letters_to_col("z"), Some(25));
        assert_eq!(letters_to_col("AA"), Some(26));
        assert_eq!(letters_to_col("ZZ"), Some(701));
        assert_eq!(letters_to_col("AAA"), Some(702));
        assert_eq!(letters_to_col(""), None);
        assert_eq!(letters_to_col("A1"), None);
    }

    #[test]
    fn test_letters_roundtrip() {
        for col in 0..2000 {
            assert_eq!(letters_to_col(&col_to_letters(col)), Some(col));
        }
    }

    #[test]
    fn test_column_headers() {
        assert_eq!(column_headers(3), vec!["A", "B", "C"]);
        assert!(column_headers(0).is_empty());
        assert_eq!(column_headers(28)[27], "AB");
    }
}
