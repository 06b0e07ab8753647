//! Small field helpers shared by aggregate `validate()` implementations

/// Empty/whitespace strings become `None`
pub fn opt(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn require(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Loose e-mail check: one `@` with something on both sides and a dot in the domain
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Trim, drop blanks and duplicates, keep first-seen order
pub fn clean_list(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|x| x == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("sales@acme.com"));
        assert!(looks_like_email("  a.b@mail.example.org "));
        assert!(!looks_like_email("acme.com"));
        assert!(!looks_like_email("@acme.com"));
        assert!(!looks_like_email("a@b@c.com"));
        assert!(!looks_like_email("a@localhost"));
    }

    #[test]
    fn test_clean_list() {
        let input = vec![
            " 10115".to_string(),
            "".to_string(),
            "10115".to_string(),
            "10117 ".to_string(),
        ];
        assert_eq!(clean_list(&input), vec!["10115", "10117"]);
    }

    #[test]
    fn test_opt() {
        assert_eq!(opt(Some("  ".into())), None);
        assert_eq!(opt(Some(" x ".into())), Some("x".into()));
        assert_eq!(opt(None), None);
    }
}
