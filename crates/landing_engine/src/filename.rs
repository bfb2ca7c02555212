use sha2::{Digest, Sha256};

/// Filesystem-safe preview document name: `{sanitized_domain}--{short_hash(domain)}.html`.
///
/// The hash keeps names distinct when sanitizing collapses two domains together.
pub fn preview_filename(domain: &str) -> String {
    let sanitized = sanitize_domain(domain);
    let hash = short_hash(domain);
    format!("{sanitized}--{hash}.html")
}

fn sanitize_domain(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.trim().chars() {
        let c = if c.is_alphanumeric() || matches!(c, '-' | '.') {
            c.to_lowercase().next().unwrap_or(c)
        } else {
            '_'
        };
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut cleaned = compacted.trim_matches(&['_', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "landing".to_string();
    }
    if cleaned.chars().count() > 64 {
        cleaned = cleaned.chars().take(64).collect();
    }
    cleaned
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::preview_filename;

    #[test]
    fn plain_domain_is_kept() {
        let name = preview_filename("pizza-moscow.ru");
        assert!(name.starts_with("pizza-moscow.ru--"));
        assert!(name.ends_with(".html"));
    }

    #[test]
    fn path_characters_are_replaced() {
        let name = preview_filename("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(name.starts_with("etc_passwd--"), "{name}");
    }

    #[test]
    fn hash_distinguishes_collapsed_names() {
        assert_ne!(preview_filename("a/b"), preview_filename("a:b"));
    }

    #[test]
    fn unicode_domains_are_lowercased() {
        let name = preview_filename("ПИЦЦА.рф");
        assert!(name.starts_with("пицца.рф--"), "{name}");
    }
}
