//! Lightweight extractive NLP over article text: keyword ranking and a
//! sentence-scoring summarizer.
//!
//! Scoring mirrors what news-scraping libraries conventionally do: sentences
//! are ranked by title overlap, keyword density, length and position, and the
//! winners are emitted in document order.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const SUMMARY_SENTENCES: usize = 5;
pub const MAX_KEYWORDS: usize = 10;

const IDEAL_SENTENCE_WORDS: f64 = 20.0;
const MIN_SENTENCE_WORDS: usize = 3;
const MIN_KEYWORD_CHARS: usize = 3;

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does", "for",
    "from", "had", "has", "have", "he", "her", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "more", "most", "no", "not", "of", "on", "one", "or", "other", "our", "out",
    "over", "said", "says", "she", "so", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "to", "two", "up", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "will", "with", "would", "you", "your",
];

const INDONESIAN_STOPWORDS: &[&str] = &[
    "ada", "adalah", "agar", "akan", "aku", "antara", "apa", "atas", "atau", "bagi", "bahkan",
    "bahwa", "banyak", "baru", "belum", "berada", "bisa", "buat", "bukan", "dalam", "dan",
    "dapat", "dari", "daripada", "dengan", "di", "dia", "diri", "hal", "hanya", "harus", "hingga",
    "ia", "ini", "itu", "jadi", "jika", "juga", "kali", "kalau", "kami", "kata", "ke", "kepada",
    "ketika", "kita", "lagi", "lain", "lalu", "lebih", "maka", "masih", "mau", "mereka", "namun",
    "oleh", "pada", "para", "pula", "saat", "saja", "sampai", "sangat", "satu", "saya", "sebagai",
    "sebelum", "sedang", "sejak", "selain", "selama", "semua", "sementara", "sendiri", "serta",
    "setelah", "sudah", "tak", "telah", "tentang", "tersebut", "tetapi", "tidak", "untuk", "yaitu",
    "yakni", "yang",
];

static ENGLISH: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());
static INDONESIAN: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INDONESIAN_STOPWORDS.iter().copied().collect());
static COMBINED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ENGLISH_STOPWORDS
        .iter()
        .chain(INDONESIAN_STOPWORDS)
        .copied()
        .collect()
});

fn stopwords(language: Option<&str>) -> &'static HashSet<&'static str> {
    match language {
        Some("en") => &ENGLISH,
        Some("id") => &INDONESIAN,
        _ => &COMBINED,
    }
}

/// Lower-cased word tokens; numbers and punctuation are dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '-')
        .map(|word| word.trim_matches('-').to_lowercase())
        .filter(|word| !word.is_empty() && !word.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

/// Keywords with their relative frequency, best first.
fn ranked_keywords(text: &str, language: Option<&str>, max: usize) -> Vec<(String, f64)> {
    let stop = stopwords(language);
    let words: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_CHARS && !stop.contains(w.as_str()))
        .collect();
    if words.is_empty() {
        return Vec::new();
    }

    // (count, first position) so ties resolve in reading order
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in words.iter().enumerate() {
        counts.entry(word.as_str()).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let total = words.len() as f64;
    ranked
        .into_iter()
        .take(max)
        .map(|(word, count, _)| (word.to_string(), count as f64 / total))
        .collect()
}

/// The `max` most frequent non-stop-words of the text.
pub fn keywords(text: &str, language: Option<&str>, max: usize) -> Vec<String> {
    ranked_keywords(text, language, max)
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

/// Split text into sentences on terminal punctuation followed by whitespace
/// and on line breaks.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(c);
            let at_boundary = matches!(c, '.' | '!' | '?')
                && chars.peek().is_none_or(|next| next.is_whitespace());
            if at_boundary {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
        push_sentence(&mut sentences, &current);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.split_whitespace().count() >= MIN_SENTENCE_WORDS {
        sentences.push(trimmed.to_string());
    }
}

fn title_score(title_words: &HashSet<String>, sentence_words: &[String]) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let overlap = sentence_words
        .iter()
        .filter(|w| title_words.contains(w.as_str()))
        .collect::<HashSet<_>>()
        .len();
    overlap as f64 / title_words.len() as f64
}

fn length_score(word_count: usize) -> f64 {
    let diff = (IDEAL_SENTENCE_WORDS - word_count as f64).abs();
    (1.0 - diff / IDEAL_SENTENCE_WORDS).max(0.0)
}

/// Leading sentences of a news story carry the most weight.
fn position_score(index: usize, total: usize) -> f64 {
    let normalized = (index + 1) as f64 / total as f64;
    match normalized {
        n if n <= 0.1 => 0.17,
        n if n <= 0.2 => 0.23,
        n if n <= 0.3 => 0.14,
        n if n <= 0.4 => 0.08,
        n if n <= 0.5 => 0.05,
        n if n <= 0.6 => 0.04,
        n if n <= 0.7 => 0.06,
        n if n <= 0.8 => 0.04,
        n if n <= 0.9 => 0.04,
        _ => 0.15,
    }
}

fn keyword_score(keywords: &HashMap<String, f64>, sentence_words: &[String]) -> f64 {
    if sentence_words.is_empty() {
        return 0.0;
    }
    let sum: f64 = sentence_words
        .iter()
        .filter_map(|w| keywords.get(w.as_str()))
        .sum();
    sum / sentence_words.len() as f64 * 10.0
}

/// Extractive summary of at most `max_sentences` sentences, in document order.
pub fn summarize(title: &str, text: &str, language: Option<&str>, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || max_sentences == 0 {
        return String::new();
    }

    let stop = stopwords(language);
    let title_words: HashSet<String> = tokenize(title)
        .into_iter()
        .filter(|w| !stop.contains(w.as_str()))
        .collect();
    let keywords: HashMap<String, f64> = ranked_keywords(text, language, MAX_KEYWORDS)
        .into_iter()
        .collect();

    let total = sentences.len();
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let words = tokenize(sentence);
            let score = (title_score(&title_words, &words) * 1.5
                + keyword_score(&keywords, &words) * 2.0
                + length_score(words.len()) * 0.5
                + position_score(index, total))
                / 4.0;
            (index, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut chosen: Vec<usize> = scored
        .into_iter()
        .take(max_sentences)
        .map(|(index, _)| index)
        .collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|index| sentences[index].as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY: &str = "Banjir kembali merendam sejumlah wilayah di Jakarta Timur pada Senin pagi. \
        Ketinggian air di kawasan Kampung Melayu mencapai satu meter akibat luapan Sungai Ciliwung. \
        Petugas gabungan mengevakuasi ratusan warga ke posko pengungsian terdekat. \
        Warga mengeluhkan banjir yang datang setiap musim hujan tanpa penanganan berarti. \
        Pemerintah provinsi berjanji mempercepat normalisasi sungai untuk mengurangi risiko banjir. \
        Cuaca cerah diperkirakan kembali pada akhir pekan.";

    #[test]
    fn test_split_sentences() {
        let text = "Hujan turun sejak pagi. Air mulai naik! Apakah warga siap?\nTanpa tanda baca di akhir baris";
        let sentences = split_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "Hujan turun sejak pagi.",
                "Air mulai naik!",
                "Apakah warga siap?",
                "Tanpa tanda baca di akhir baris",
            ]
        );
    }

    #[test]
    fn test_split_sentences_keeps_decimals_together() {
        let sentences = split_sentences("Curah hujan mencapai 2.5 milimeter per jam di Bogor.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_keywords_skip_stopwords_and_numbers() {
        let keywords = keywords(STORY, Some("id"), 3);
        assert_eq!(keywords[0], "banjir");
        assert!(!keywords.iter().any(|k| k == "yang" || k == "di"));
        assert!(keywords.len() <= 3);
    }

    #[test]
    fn test_keywords_empty_text() {
        assert!(keywords("", None, MAX_KEYWORDS).is_empty());
        assert!(keywords("di ke 12 34", Some("id"), MAX_KEYWORDS).is_empty());
    }

    #[test]
    fn test_summary_respects_limit_and_order() {
        let summary = summarize("Banjir Rendam Jakarta Timur", STORY, Some("id"), 3);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);

        let sentences = split_sentences(STORY);
        let positions: Vec<usize> = lines
            .iter()
            .map(|line| sentences.iter().position(|s| s == line).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(summary.contains("Banjir kembali merendam"));
    }

    #[test]
    fn test_summary_of_short_text_is_whole_text() {
        let summary = summarize("Judul", "Satu kalimat saja di sini.", None, SUMMARY_SENTENCES);
        assert_eq!(summary, "Satu kalimat saja di sini.");
    }

    #[test]
    fn test_summary_empty_when_no_sentences() {
        assert_eq!(summarize("Judul", "  ", None, SUMMARY_SENTENCES), "");
    }
}
