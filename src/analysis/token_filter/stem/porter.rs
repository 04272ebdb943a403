//! Porter stemming algorithm implementation.
//!
//! The stemmer applies five groups of suffix rewrite rules:
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and reduce -ll
//!
//! Within a step only the longest matching suffix is considered; if its
//! condition fails the step leaves the word alone.
//!
//! # Examples
//!
//! ```
//! use kestrel::analysis::token_filter::stem::Stemmer;
//! use kestrel::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("watered"), "water");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// Longer suffixes precede the suffixes they end with.
const STEP4_SUFFIXES: &[&str] = &[
    "ement", "ment", "ance", "ence", "able", "ible", "ant", "ent", "ion", "ism", "ate", "iti",
    "ous", "ive", "ize", "al", "er", "ic", "ou",
];

/// Porter stemming algorithm for English.
///
/// Words that are not pure ASCII, or are two characters or shorter, are
/// returned unchanged (apart from ASCII lowercasing).
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    fn is_consonant(word: &[u8], i: usize) -> bool {
        match word[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !Self::is_consonant(word, i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences, the `m` in `[C](VC){m}[V]`.
    fn measure(word: &str) -> usize {
        let bytes = word.as_bytes();
        let n = bytes.len();
        let mut i = 0;

        while i < n && Self::is_consonant(bytes, i) {
            i += 1;
        }

        let mut m = 0;
        loop {
            while i < n && !Self::is_consonant(bytes, i) {
                i += 1;
            }
            if i >= n {
                break;
            }
            while i < n && Self::is_consonant(bytes, i) {
                i += 1;
            }
            m += 1;
        }

        m
    }

    fn contains_vowel(word: &str) -> bool {
        let bytes = word.as_bytes();
        (0..bytes.len()).any(|i| !Self::is_consonant(bytes, i))
    }

    fn ends_double_consonant(word: &str) -> bool {
        let bytes = word.as_bytes();
        let n = bytes.len();
        n >= 2 && bytes[n - 1] == bytes[n - 2] && Self::is_consonant(bytes, n - 1)
    }

    /// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
    fn ends_cvc(word: &str) -> bool {
        let bytes = word.as_bytes();
        let n = bytes.len();
        n >= 3
            && Self::is_consonant(bytes, n - 3)
            && !Self::is_consonant(bytes, n - 2)
            && Self::is_consonant(bytes, n - 1)
            && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
    }

    fn step1a(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix("sses") {
            format!("{stem}ss")
        } else if let Some(stem) = word.strip_suffix("ies") {
            format!("{stem}i")
        } else if word.ends_with("ss") {
            word.to_string()
        } else if let Some(stem) = word.strip_suffix('s') {
            stem.to_string()
        } else {
            word.to_string()
        }
    }

    fn step1b(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix("eed") {
            return if Self::measure(stem) > 0 {
                format!("{stem}ee")
            } else {
                word.to_string()
            };
        }

        let stripped = word
            .strip_suffix("ed")
            .or_else(|| word.strip_suffix("ing"));

        match stripped {
            Some(stem) if Self::contains_vowel(stem) => self.step1b_cleanup(stem),
            _ => word.to_string(),
        }
    }

    /// Repairs applied after -ed or -ing has been removed.
    fn step1b_cleanup(&self, stem: &str) -> String {
        if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
            format!("{stem}e")
        } else if Self::ends_double_consonant(stem)
            && !(stem.ends_with('l') || stem.ends_with('s') || stem.ends_with('z'))
        {
            stem[..stem.len() - 1].to_string()
        } else if Self::measure(stem) == 1 && Self::ends_cvc(stem) {
            format!("{stem}e")
        } else {
            stem.to_string()
        }
    }

    fn step1c(&self, word: &str) -> String {
        match word.strip_suffix('y') {
            Some(stem) if Self::contains_vowel(stem) => format!("{stem}i"),
            _ => word.to_string(),
        }
    }

    fn replace_longest(&self, word: &str, rules: &[(&str, &str)]) -> String {
        for (suffix, replacement) in rules {
            if let Some(stem) = word.strip_suffix(suffix) {
                if Self::measure(stem) > 0 {
                    return format!("{stem}{replacement}");
                }
                break;
            }
        }
        word.to_string()
    }

    fn step4(&self, word: &str) -> String {
        for suffix in STEP4_SUFFIXES {
            if let Some(stem) = word.strip_suffix(suffix) {
                let ion_ok = *suffix != "ion" || stem.ends_with('s') || stem.ends_with('t');
                if Self::measure(stem) > 1 && ion_ok {
                    return stem.to_string();
                }
                break;
            }
        }
        word.to_string()
    }

    fn step5(&self, word: &str) -> String {
        let word = match word.strip_suffix('e') {
            Some(stem) => {
                let m = Self::measure(stem);
                if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                    stem
                } else {
                    word
                }
            }
            None => word,
        };

        if word.ends_with("ll") && Self::measure(word) > 1 {
            word[..word.len() - 1].to_string()
        } else {
            word.to_string()
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.is_ascii() {
            return word.to_string();
        }

        let word = word.to_ascii_lowercase();

        let word = self.step1a(&word);
        let word = self.step1b(&word);
        let word = self.step1c(&word);
        let word = self.replace_longest(&word, STEP2_SUFFIXES);
        let word = self.replace_longest(&word, STEP3_SUFFIXES);
        let word = self.step4(&word);
        self.step5(&word)
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("disabled"), "disabl");
        assert_eq!(stemmer.stem("measuring"), "measur");
        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("ponies"), "poni");
        assert_eq!(stemmer.stem("hopping"), "hop");
        assert_eq!(stemmer.stem("filing"), "file");
        assert_eq!(stemmer.stem("happy"), "happi");
    }

    #[test]
    fn test_inflections_share_a_stem() {
        let stemmer = PorterStemmer::new();

        for word in ["water", "waters", "watered", "watering"] {
            assert_eq!(stemmer.stem(word), "water", "{word}");
        }
        assert_eq!(stemmer.stem("plumbs"), stemmer.stem("plumb"));
        assert_eq!(stemmer.stem("plant"), "plant");
        assert_eq!(stemmer.stem("scarlett"), "scarlett");
        assert_eq!(stemmer.stem("candlestick"), "candlestick");
    }

    #[test]
    fn test_short_and_non_ascii_words() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("cafés"), "cafés");
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(PorterStemmer::measure("tree"), 0);
        assert_eq!(PorterStemmer::measure("trees"), 1);
        assert_eq!(PorterStemmer::measure("trouble"), 1);
        assert_eq!(PorterStemmer::measure("troubles"), 2);
    }

    #[test]
    fn test_porter_vowel_detection() {
        let word = b"trouble";

        assert!(PorterStemmer::is_consonant(word, 0)); // t
        assert!(PorterStemmer::is_consonant(word, 1)); // r
        assert!(!PorterStemmer::is_consonant(word, 2)); // o
        assert!(!PorterStemmer::is_consonant(word, 3)); // u
        assert!(PorterStemmer::is_consonant(word, 4)); // b
        assert!(PorterStemmer::is_consonant(word, 5)); // l
        assert!(!PorterStemmer::is_consonant(word, 6)); // e
        assert!(PorterStemmer::is_consonant(b"toy", 2)); // y after a vowel
        assert!(!PorterStemmer::is_consonant(b"sky", 2)); // y after a consonant
    }
}
