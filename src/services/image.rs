use crate::models::Candidate;

/// Base of the generated placeholder; the product name is appended URL-encoded
const PLACEHOLDER_URL: &str = "https://placehold.co/400x400?text=";

/// Resolves the display image for a candidate
///
/// First match wins:
/// 1. the candidate's own image
/// 2. the first variant's image
/// 3. the first variant's first additional image
/// 4. a placeholder carrying the candidate's name
///
/// Blank references count as missing, so the result is never empty.
pub fn resolve_image(candidate: &Candidate) -> String {
    let first_variant = candidate.variants.first();

    let found = non_blank(candidate.image.as_deref())
        .or_else(|| non_blank(first_variant.and_then(|v| v.image.as_deref())))
        .or_else(|| non_blank(first_variant.and_then(|v| v.images.first().map(String::as_str))));

    match found {
        Some(image) => image.to_string(),
        None => placeholder(&candidate.name),
    }
}

fn non_blank(image: Option<&str>) -> Option<&str> {
    image.filter(|i| !i.trim().is_empty())
}

fn placeholder(name: &str) -> String {
    format!("{}{}", PLACEHOLDER_URL, urlencoding::encode(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;

    fn lamp() -> Candidate {
        Candidate::new("P1", "Desk Lamp & Shade", "Lighting", 45.0)
    }

    fn variant(image: Option<&str>, images: &[&str]) -> Variant {
        Variant {
            color: None,
            image: image.map(str::to_string),
            images: images.iter().map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn test_candidate_image_wins() {
        let mut candidate = lamp();
        candidate.image = Some("https://img.local/own.png".to_string());
        candidate.variants = vec![variant(Some("https://img.local/variant.png"), &[])];

        assert_eq!(resolve_image(&candidate), "https://img.local/own.png");
    }

    #[test]
    fn test_first_variant_image() {
        let mut candidate = lamp();
        candidate.variants = vec![
            variant(Some("https://img.local/first.png"), &["https://img.local/extra.png"]),
            variant(Some("https://img.local/second.png"), &[]),
        ];

        assert_eq!(resolve_image(&candidate), "https://img.local/first.png");
    }

    #[test]
    fn test_first_variant_additional_image() {
        let mut candidate = lamp();
        candidate.variants = vec![variant(
            None,
            &["https://img.local/extra-1.png", "https://img.local/extra-2.png"],
        )];

        assert_eq!(resolve_image(&candidate), "https://img.local/extra-1.png");
    }

    #[test]
    fn test_only_first_variant_is_consulted() {
        let mut candidate = lamp();
        candidate.variants = vec![
            variant(None, &[]),
            variant(Some("https://img.local/second.png"), &[]),
        ];

        assert!(resolve_image(&candidate).starts_with(PLACEHOLDER_URL));
    }

    #[test]
    fn test_placeholder_encodes_name() {
        assert_eq!(
            resolve_image(&lamp()),
            "https://placehold.co/400x400?text=Desk%20Lamp%20%26%20Shade"
        );
    }

    #[test]
    fn test_blank_image_falls_through() {
        let mut candidate = lamp();
        candidate.image = Some("   ".to_string());
        candidate.variants = vec![variant(Some(""), &["https://img.local/extra.png"])];

        assert_eq!(resolve_image(&candidate), "https://img.local/extra.png");
    }

    #[test]
    fn test_never_empty_for_unnamed_candidate() {
        let candidate = Candidate::new("P2", "", "Misc", 1.0);
        assert!(!resolve_image(&candidate).is_empty());
    }
}
