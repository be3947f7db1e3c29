//! Advisory check of the English-output policy.
//!
//! The model is instructed to answer in English; nothing enforces it. This heuristic
//! flags output that still reads as Spanish so operators can see it in the logs. It
//! never rejects or rewrites a record.

/// Common Spanish function words and contract vocabulary that rarely occur in English prose.
const SPANISH_MARKERS: &[&str] = &[
    "el", "la", "los", "las", "del", "de", "y", "que", "por", "para", "con", "una", "un", "se",
    "su", "sus", "al", "como", "entre", "contrato", "partes", "plazo", "cláusula", "pago",
    "penalización", "arrendamiento", "vigencia", "años", "meses", "será", "deberá",
];

/// Marker density above which a text is considered Spanish.
const SPANISH_THRESHOLD: f64 = 0.2;
/// Texts shorter than this carry too little signal to judge.
const MIN_WORDS: usize = 4;

/// Fraction of words in `text` that are Spanish markers, in `0.0..=1.0`.
pub fn spanish_score(text: &str) -> f64 {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        return 0.0;
    }

    let hits = words
        .iter()
        .filter(|w| SPANISH_MARKERS.contains(&w.as_str()))
        .count();
    hits as f64 / words.len() as f64
}

/// True when `text` is long enough to judge and reads as Spanish.
pub fn looks_spanish(text: &str) -> bool {
    let word_count = text.split_whitespace().count();
    word_count >= MIN_WORDS && spanish_score(text) > SPANISH_THRESHOLD
}

/// Returns the fragments among `texts` that look Spanish.
pub fn untranslated<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    texts.into_iter().filter(|t| looks_spanish(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_contract_summary_is_not_flagged() {
        assert!(!looks_spanish(
            "Lease of commercial premises located in Madrid for office use"
        ));
    }

    #[test]
    fn test_spanish_sentence_is_flagged() {
        assert!(looks_spanish(
            "El arrendatario deberá pagar una penalización del 5% por cada mes de retraso"
        ));
    }

    #[test]
    fn test_short_fragments_are_not_judged() {
        // Party names are kept verbatim and are often Spanish.
        assert!(!looks_spanish("Inmobiliaria del Sur"));
        assert!(!looks_spanish(""));
    }

    #[test]
    fn test_score_is_zero_for_non_alphabetic_text() {
        assert_eq!(spanish_score("2024-01-01 / 5%"), 0.0);
    }

    #[test]
    fn test_score_handles_accents_and_case() {
        let score = spanish_score("CLÁUSULA de PENALIZACIÓN");
        assert!(score > 0.5, "score was {score}");
    }

    #[test]
    fn test_untranslated_returns_only_spanish_fragments() {
        let texts = [
            "Confidentiality obligations survive termination of the agreement",
            "Las partes se obligan a mantener la confidencialidad de la información",
        ];
        let flagged = untranslated(texts.iter().copied());
        assert_eq!(flagged, vec![texts[1]]);
    }
}
