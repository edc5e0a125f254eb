const MIN_CONTENT_LENGTH: usize = 200;
const MIN_WORD_COUNT: usize = 30;
const MAX_BOILERPLATE_RATIO: f64 = 0.3;

/// Phrases typical of consent walls, paywalls and error pages.
const BOILERPLATE_KEYWORDS: [&str; 30] = [
    "cookie",
    "privacy",
    "consent",
    "gdpr",
    "accept all",
    "reject all",
    "manage",
    "preferences",
    "tracking",
    "advertisement",
    "subscribe",
    "newsletter",
    "sign in",
    "sign up",
    "password",
    "404",
    "not found",
    "access denied",
    "please wait",
    "javascript",
    "enable",
    "browser",
    "redirect",
    "click here",
    "kebijakan privasi",
    "persetujuan",
    "berlangganan",
    "aktifkan",
    "halaman tidak ditemukan",
    "iklan",
];

/// Reason the extracted text is unusable as an article, if it is.
pub fn rejection_reason(title: &str, text: &str) -> Option<&'static str> {
    if text.chars().count() < MIN_CONTENT_LENGTH {
        return Some("content too short");
    }

    let word_count = text.split_whitespace().count();

    if title.trim().is_empty() && word_count < MIN_WORD_COUNT {
        return Some("untitled and too few words");
    }

    if boilerplate_ratio(text, word_count) > MAX_BOILERPLATE_RATIO {
        return Some("boilerplate page");
    }

    None
}

fn boilerplate_ratio(text: &str, total_words: usize) -> f64 {
    if total_words == 0 {
        return 1.0;
    }
    let text_lower = text.to_lowercase();
    let hits: usize = BOILERPLATE_KEYWORDS
        .iter()
        .map(|keyword| text_lower.matches(keyword).count())
        .sum();
    hits as f64 / total_words as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_short_content() {
        assert_eq!(rejection_reason("Judul", "Pendek"), Some("content too short"));
        assert_eq!(rejection_reason("Judul", &"Isi berita yang cukup panjang ".repeat(20)), None);
    }

    #[test]
    fn test_reject_empty_title_low_words() {
        let text = "Satuduatigaempatlimaenamtujuhdelapansembilansepuluh ".repeat(5);
        assert_eq!(rejection_reason("", &text), Some("untitled and too few words"));
    }

    #[test]
    fn test_reject_consent_wall() {
        let text = "cookie consent privacy preferences manage tracking accept all reject all ".repeat(10);
        assert_eq!(rejection_reason("Before you continue", &text), Some("boilerplate page"));
    }

    #[test]
    fn test_accept_news_text() {
        let text = "Hujan deras yang mengguyur Jakarta sejak pagi membuat sejumlah ruas jalan tergenang air. ".repeat(5);
        assert_eq!(rejection_reason("Banjir Jakarta", &text), None);
    }
}
