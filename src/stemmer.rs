//! # Porter Stemmer
//! Classic five-step suffix-stripping reducer used to fold inflected review
//! words onto a shared stem ("running" → "run", "caring" → "care") before
//! lexicon lookup.
//!
//! - Characters are classified as consonants/vowels; `y` counts as a vowel
//!   only when it follows a non-vowel, non-`y` character.
//! - The measure `m` of a word is the number of vowel-run → consonant-run
//!   transitions left after dropping a leading consonant run and a trailing
//!   vowel run; most rules are gated on it.
//! - The algorithm is total: it always terminates and falls back to identity
//!   on tokens no rule matches (punctuation-bearing tokens pass through).

/// Stem a single word. Case-insensitive; the result is always lower-case.
/// Words shorter than three characters are returned lower-cased unchanged
/// (no suffix rule applies below that length).
pub fn stem(word: &str) -> String {
    let lowered = word.to_lowercase();
    if lowered.chars().count() < 3 {
        return lowered;
    }
    let w = step1a(lowered);
    let w = step1b(w);
    let w = step1c(w);
    let w = step2(w);
    let w = step3(w);
    let w = step4(w);
    let w = step5a(w);
    step5b(w)
}

fn is_vowel(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => i > 0 && !matches!(chars[i - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'y'),
        _ => false,
    }
}

/// Number of VC transitions in the middle of the word.
fn measure(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut m = 0;
    let mut i = 0;
    while i < n && !is_vowel(&chars, i) {
        i += 1;
    }
    loop {
        while i < n && is_vowel(&chars, i) {
            i += 1;
        }
        if i >= n {
            break;
        }
        m += 1;
        while i < n && !is_vowel(&chars, i) {
            i += 1;
        }
    }
    m
}

fn contains_vowel(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    (0..chars.len()).any(|i| is_vowel(&chars, i))
}

/// True when the word ends in a doubled consonant (`y` included, `aeiou` not).
fn ends_double_consonant(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    n >= 2 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Consonant-vowel-consonant check for the triple ending at `last`, where the
/// final consonant must not be `w`, `x` or `y`.
fn cvc_at(chars: &[char], last: usize) -> bool {
    last >= 2
        && !is_vowel(chars, last - 2)
        && is_vowel(chars, last - 1)
        && !is_vowel(chars, last)
        && !matches!(chars[last], 'w' | 'x' | 'y')
}

/// Plural reduction: `caresses` → `caress`, `ponies` → `poni`, `cats` → `cat`.
fn step1a(w: String) -> String {
    if w.ends_with("sses") || w.ends_with("ies") {
        let mut s = w;
        s.pop();
        s.pop();
        return s;
    }
    if w.ends_with('s') && !w.ends_with("ss") && w.chars().count() > 2 {
        let mut s = w;
        s.pop();
        return s;
    }
    w
}

/// `-eed`/`-ed`/`-ing` handling with the e-restoration rules.
fn step1b(w: String) -> String {
    if let Some(stem) = w.strip_suffix("eed") {
        if measure(stem) > 0 {
            let mut s = w;
            s.pop(); // eed -> ee
            return s;
        }
        return w;
    }

    let stripped = w.strip_suffix("ed").or_else(|| w.strip_suffix("ing"));
    if let Some(stem) = stripped {
        if contains_vowel(stem) {
            if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
                return format!("{stem}e");
            }
            let last = stem.chars().next_back();
            if ends_double_consonant(stem) && !matches!(last, Some('l') | Some('s') | Some('z')) {
                let mut s = stem.to_string();
                s.pop();
                return s;
            }
            let chars: Vec<char> = stem.chars().collect();
            if measure(stem) == 1 && cvc_at(&chars, chars.len() - 1) {
                return format!("{stem}e");
            }
            return stem.to_string();
        }
    }
    w
}

/// Trailing `y` → `i` when the rest of the word contains a vowel.
fn step1c(w: String) -> String {
    if let Some(stem) = w.strip_suffix('y') {
        if contains_vowel(stem) {
            return format!("{stem}i");
        }
    }
    w
}

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("bli", "ble"),
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
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Apply an ordered rule list. Each rule is gated on the measure of the
/// original token with the suffix removed; the replacement itself is applied
/// to the accumulated result.
fn replace_suffixes(token: String, rules: &[(&str, &str)], threshold: usize) -> String {
    let original = token.clone();
    let mut out = token;
    for (suffix, replacement) in rules {
        if let Some(stem) = original.strip_suffix(suffix) {
            if measure(stem) > threshold {
                if let Some(kept) = out.strip_suffix(suffix) {
                    out = format!("{kept}{replacement}");
                }
            }
        }
    }
    out
}

fn step2(w: String) -> String {
    replace_suffixes(w, STEP2_RULES, 0)
}

fn step3(w: String) -> String {
    replace_suffixes(w, STEP3_RULES, 0)
}

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Bare suffix removal gated on `m > 1`, plus `-ion` preceded by `s`/`t`.
fn step4(w: String) -> String {
    let chars: Vec<char> = w.chars().collect();
    let n = chars.len();

    // The longest listed suffix that leaves a non-empty stem wins; when its
    // measure gate fails no shorter suffix is retried.
    for p in 1..n {
        let tail: String = chars[p..].iter().collect();
        if STEP4_SUFFIXES.contains(&tail.as_str()) {
            let stem: String = chars[..p].iter().collect();
            if measure(&stem) > 1 {
                return stem;
            }
            break;
        }
    }

    if n >= 5 {
        let tail: String = chars[n - 3..].iter().collect();
        if tail == "ion" && matches!(chars[n - 4], 's' | 't') {
            let candidate: String = chars[..n - 3].iter().collect();
            if measure(&candidate) > 1 {
                return candidate;
            }
        }
    }
    w
}

/// Drop a trailing `e` when `m > 1`, or when `m == 1` and the word does not
/// end consonant-vowel-consonant before the `e`.
fn step5a(w: String) -> String {
    if !w.ends_with('e') {
        return w;
    }
    let stem = &w[..w.len() - 1];
    let m = measure(stem);
    if m > 1 {
        return stem.to_string();
    }
    if m == 1 {
        let chars: Vec<char> = w.chars().collect();
        let n = chars.len();
        let cvc = n >= 4 && cvc_at(&chars, n - 2);
        if !cvc {
            return stem.to_string();
        }
    }
    w
}

/// `-ll` → `-l` when `m > 1`.
fn step5b(w: String) -> String {
    if w.ends_with("ll") && measure(&w) > 1 {
        let mut s = w;
        s.pop();
        return s;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_are_lowercased_only() {
        for w in ["i", "Am", "GO", "be", "it"] {
            assert_eq!(stem(w), w.to_lowercase());
        }
    }

    #[test]
    fn plural_reduction() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("flies"), "fli");
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn ed_ing_with_restoration() {
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("feed"), "feed");
        assert_eq!(stem("plastered"), "plaster");
        assert_eq!(stem("bled"), "bled");
        assert_eq!(stem("motoring"), "motor");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("conflated"), "conflat");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("hoping"), "hope");
        assert_eq!(stem("falling"), "fall");
        assert_eq!(stem("filing"), "file");
    }

    #[test]
    fn y_to_i() {
        assert_eq!(stem("happy"), "happi");
        assert_eq!(stem("sky"), "sky");
    }

    #[test]
    fn later_steps() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("conditional"), "condit");
        assert_eq!(stem("rational"), "ration");
        assert_eq!(stem("generalization"), "gener");
        assert_eq!(stem("oscillator"), "oscil");
        assert_eq!(stem("adjustable"), "adjust");
        assert_eq!(stem("effective"), "effect");
        assert_eq!(stem("wonderful"), "wonder");
        assert_eq!(stem("helpful"), "help");
        assert_eq!(stem("excellent"), "excel");
    }

    #[test]
    fn review_vocabulary() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("caring"), "care");
        assert_eq!(stem("care"), "care");
        assert_eq!(stem("friendly"), "friendli");
        assert_eq!(stem("rude"), "rude");
        assert_eq!(stem("CARING"), "care");
    }

    #[test]
    fn idempotent_on_stemmed_forms() {
        for w in [
            "running",
            "caresses",
            "relational",
            "generalization",
            "happy",
            "troubled",
            "recommended",
            "disappointing",
        ] {
            let once = stem(w);
            assert_eq!(stem(&once), once, "stem of {w:?} not idempotent");
        }
    }

    #[test]
    fn total_on_non_letter_tokens() {
        assert_eq!(stem("great!"), "great!");
        assert_eq!(stem("5-star"), "5-star");
    }
}
