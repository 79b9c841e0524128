//! # Cleansing Pipeline
//!
//! A 5-stage pipeline that turns a raw tweet into lowercase, space-separated
//! words.
//!
//! ## Pipeline Stages
//!
//! 1. **Stage 1: Lowercase**
//! 2. **Stage 2: Noise Strip** - punctuation, retweet marker, digits, `user`
//!    placeholders, URLs, `pic.twitter.com` links
//! 3. **Stage 3: Profanity Removal** - drops words in the profanity set
//! 4. **Stage 4: Slang Normalization** - maps alay words to canonical words
//! 5. **Stage 5: Stopword Removal** - drops words in the stopword set
//!
//! Stages always run in this order. Every stage is a pure `&str -> String`
//! function, so the whole pipeline is deterministic for a given input and
//! lexicon.

use crate::lexicon::Lexicon;
use regex::Regex;
use std::sync::LazyLock;

/// Cleansing configuration options.
///
/// Stages 1 and 2 always run; the lexicon-driven stages can be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanseOptions {
    /// Strip URLs from the lowercased text before punctuation is replaced.
    pub strip_urls_first: bool,
    /// Enable Stage 3: Profanity removal
    pub remove_profanity: bool,
    /// Enable Stage 4: Slang normalization
    pub normalize_slang: bool,
    /// Enable Stage 5: Stopword removal
    pub remove_stopwords: bool,
}

impl Default for CleanseOptions {
    fn default() -> Self {
        Self {
            strip_urls_first: true,
            remove_profanity: true,
            normalize_slang: true,
            remove_stopwords: true,
        }
    }
}

impl CleanseOptions {
    /// Lowercase and noise strip only; the lexicon is not consulted.
    pub fn minimal() -> Self {
        Self {
            strip_urls_first: true,
            remove_profanity: false,
            normalize_slang: false,
            remove_stopwords: false,
        }
    }

    /// Returns true if any stage needs the lexicon.
    pub fn uses_lexicon(&self) -> bool {
        self.remove_profanity || self.normalize_slang || self.remove_stopwords
    }
}

// ============================================================================
// Stage 1: Lowercase
// ============================================================================

/// Stage 1: Lowercase every character (Unicode simple + special casing).
pub fn stage1_lowercase(input: &str) -> String {
    input.to_lowercase()
}

// ============================================================================
// Stage 2: Noise Strip
// ============================================================================

// Regex patterns (compiled once using LazyLock)
static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z]+").unwrap());

// Whole leading retweet run: stacked markers plus the spaces, digits and
// `user` placeholders around them.
static RE_RT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s|\d|user)*(?:rt\b(?:\s|\d|user)*)+").unwrap()
});

const RETWEET_MARKER: &str = "rt";

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

static RE_USER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"user").unwrap());

static RE_COLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":").unwrap());

static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(www\.[^\s]+)|(https?://[^\s]+)|(http?://[^\s]+)").unwrap()
});

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Dots are unescaped on purpose: after punctuation replacement the link
// reads "pic twitter com <id>".
static RE_PIC_TWITTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pic.twitter.com.\w+").unwrap());

/// Removes URLs and `pic.twitter.com` links while their punctuation is still
/// intact.
pub fn strip_urls(input: &str) -> String {
    let result = RE_URL.replace_all(input, " ");
    RE_PIC_TWITTER.replace_all(&result, " ").into_owned()
}

/// Stage 2: Strip punctuation and platform noise.
///
/// Each sub-step is a full pass over the string, in this order:
///
/// - every run of non-alphanumeric characters becomes one space
/// - leading `rt` retweet markers are removed
/// - digits are deleted
/// - `user` placeholders are replaced by a space
/// - colons become spaces
/// - `www.` / `http://` / `https://` URLs are removed
/// - whitespace runs collapse into one space
/// - `pic.twitter.com` links are removed
///
/// The result may carry leading or trailing spaces; the token stages and the
/// final normalization remove them.
pub fn stage2_strip_noise(input: &str, options: &CleanseOptions) -> String {
    let mut result = if options.strip_urls_first {
        strip_urls(input)
    } else {
        input.to_string()
    };

    for (pattern, replacement) in [
        (&*RE_NON_ALNUM, " "),
        (&*RE_RT_PREFIX, " "),
        (&*RE_DIGITS, ""),
        (&*RE_USER, " "),
        (&*RE_COLON, " "),
        (&*RE_URL, " "),
        (&*RE_WHITESPACE, " "),
        (&*RE_PIC_TWITTER, " "),
    ] {
        result = pattern.replace_all(&result, replacement).into_owned();
    }

    result
}

// ============================================================================
// Stages 3-5: Lexicon Lookups
// ============================================================================

/// Stage 3: Drop every whitespace-delimited word found in the profanity set.
pub fn stage3_remove_profanity(input: &str, lexicon: &Lexicon) -> String {
    join_words(input.split_whitespace().filter(|w| !lexicon.is_profane(w)))
}

/// Stage 4: Replace every word that has a slang mapping with its canonical
/// form.
///
/// Each word is looked up on its own; words without a mapping pass through.
pub fn stage4_normalize_slang(input: &str, lexicon: &Lexicon) -> String {
    join_words(input.split_whitespace().map(|w| lexicon.normalize(w)))
}

/// Stage 5: Drop every whitespace-delimited word found in the stopword set.
pub fn stage5_remove_stopwords(input: &str, lexicon: &Lexicon) -> String {
    join_words(input.split_whitespace().filter(|w| !lexicon.is_stopword(w)))
}

fn join_words<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut result = String::new();
    for word in words {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

// ============================================================================
// Main Pipeline
// ============================================================================

/// Run the full cleansing pipeline on one text unit.
///
/// # Example
///
/// ```
/// use tweetclean::{cleanse, CleanseOptions, Lexicon};
///
/// let lexicon = Lexicon::builder()
///     .slang("gw", "saya")
///     .stopword("yang")
///     .build();
///
/// let clean = cleanse("RT @USER: Gw yang paling 100% benar!!", &lexicon, &CleanseOptions::default());
/// assert_eq!(clean, "saya paling benar");
/// ```
pub fn cleanse(input: &str, lexicon: &Lexicon, options: &CleanseOptions) -> String {
    let mut result = stage1_lowercase(input);

    result = stage2_strip_noise(&result, options);

    if options.remove_profanity {
        result = stage3_remove_profanity(&result, lexicon);
    }

    if options.normalize_slang {
        result = stage4_normalize_slang(&result, lexicon);
    }

    if options.remove_stopwords {
        result = stage5_remove_stopwords(&result, lexicon);
    }

    // Final normalization: single spaces, no leading/trailing whitespace.
    // Later sub-steps and token removals can expose a retweet marker at the
    // front, which is dropped here as well.
    join_words(result.split_whitespace().skip_while(|w| *w == RETWEET_MARKER))
}

/// Run cleansing with default options
pub fn cleanse_default(input: &str, lexicon: &Lexicon) -> String {
    cleanse(input, lexicon, &CleanseOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builder()
            .slang("gw", "saya")
            .slang("bgt", "banget")
            .slang("tdk", "tidak")
            .profane("bangsat")
            .profane("kampret")
            .stopword("yang")
            .stopword("di")
            .stopword("dan")
            .build()
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(stage1_lowercase("HaLo DUNIA"), "halo dunia");
        assert_eq!(stage1_lowercase(""), "");
    }

    #[test]
    fn test_punctuation_runs_become_single_space() {
        let result = stage2_strip_noise("halo!!!...dunia", &CleanseOptions::default());
        assert_eq!(result, "halo dunia");
    }

    #[test]
    fn test_leading_rt_removed() {
        let result = stage2_strip_noise("rt kabar baik", &CleanseOptions::default());
        assert_eq!(result.trim(), "kabar baik");
    }

    #[test]
    fn test_stacked_rt_removed() {
        let options = CleanseOptions::default();
        let result = stage2_strip_noise("rt @user: rt @user: mantap", &options);
        assert_eq!(result.trim(), "mantap");

        let result = stage2_strip_noise("1rt halo", &options);
        assert_eq!(result.trim(), "halo");

        let result = stage2_strip_noise("http://t.co/x rt halo", &options);
        assert_eq!(result.trim(), "halo");

        let result = stage2_strip_noise("@user rt halo", &options);
        assert_eq!(result.trim(), "halo");
    }

    #[test]
    fn test_exposed_rt_dropped() {
        // Digit and stopword removal run after the retweet sub-step.
        assert_eq!(cleanse_default("r1t halo", &lexicon()), "halo");
        assert_eq!(cleanse_default("yang rt halo", &lexicon()), "halo");
        assert_eq!(cleanse_default("halo rt", &lexicon()), "halo rt");
    }

    #[test]
    fn test_rt_only_removed_at_start() {
        let result = stage2_strip_noise("kabar rt baik", &CleanseOptions::default());
        assert_eq!(result, "kabar rt baik");

        // A word merely starting with "rt" is not a retweet marker
        let result = stage2_strip_noise("rtx baru", &CleanseOptions::default());
        assert_eq!(result, "rtx baru");
    }

    #[test]
    fn test_digits_removed() {
        let result = stage2_strip_noise("jam 10 pagi ke2", &CleanseOptions::default());
        assert_eq!(result, "jam pagi ke");
    }

    #[test]
    fn test_user_substring_removed() {
        let result = stage2_strip_noise("user user halo", &CleanseOptions::default());
        assert_eq!(result.trim(), "halo");

        let result = stage2_strip_noise("superuser", &CleanseOptions::default());
        assert_eq!(result.trim(), "super");
    }

    #[test]
    fn test_url_prepass() {
        let options = CleanseOptions::default();
        let result = stage2_strip_noise("cek https://t.co/abc123 sekarang", &options);
        assert_eq!(result, "cek sekarang");

        let result = stage2_strip_noise("buka www.detik.com ya", &options);
        assert_eq!(result, "buka ya");
    }

    #[test]
    fn test_url_survives_without_prepass() {
        // Once punctuation is gone the URL patterns can no longer match.
        let options = CleanseOptions {
            strip_urls_first: false,
            ..CleanseOptions::default()
        };
        let result = stage2_strip_noise("cek https://t.co/abc sekarang", &options);
        assert_eq!(result, "cek https t co abc sekarang");
    }

    #[test]
    fn test_pic_twitter_removed_after_punctuation() {
        let options = CleanseOptions {
            strip_urls_first: false,
            ..CleanseOptions::default()
        };
        let result = stage2_strip_noise("lihat pic.twitter.com/AbCd ini", &options);
        assert_eq!(result.split_whitespace().collect::<Vec<_>>(), vec!["lihat", "ini"]);
    }

    #[test]
    fn test_newlines_collapsed() {
        let result = stage2_strip_noise("baris\n\nbaru\t\tlagi", &CleanseOptions::default());
        assert_eq!(result, "baris baru lagi");
    }

    #[test]
    fn test_profanity_removal() {
        let result = stage3_remove_profanity("dasar bangsat  kau kampret", &lexicon());
        assert_eq!(result, "dasar kau");
    }

    #[test]
    fn test_slang_applies_to_every_token() {
        let result = stage4_normalize_slang("gw tdk suka bgt gw", &lexicon());
        assert_eq!(result, "saya tidak suka banget saya");
    }

    #[test]
    fn test_slang_with_empty_table_is_identity() {
        let empty = Lexicon::default();
        assert_eq!(stage4_normalize_slang("gw bgt", &empty), "gw bgt");
    }

    #[test]
    fn test_stopword_removal() {
        let result = stage5_remove_stopwords("rumah yang di jakarta dan bogor", &lexicon());
        assert_eq!(result, "rumah jakarta bogor");
    }

    #[test]
    fn test_full_pipeline() {
        let input = "RT @user: Gw bgt BANGSAT yang di https://t.co/x1 sini!!! 2024";
        let result = cleanse_default(input, &lexicon());
        assert_eq!(result, "saya banget sini");
    }

    #[test]
    fn test_retweet_example() {
        let result = cleanse_default("RT @user: Check http://x.co NOW 123", &lexicon());
        assert_eq!(result, "check now");
    }

    #[test]
    fn test_slang_then_stopword() {
        // Canonical forms that are stopwords are removed by the later stage.
        let lexicon = Lexicon::builder().slang("yg", "yang").stopword("yang").build();
        assert_eq!(cleanse_default("rumah yg besar", &lexicon), "rumah besar");
    }

    #[test]
    fn test_profane_canonical_form_survives() {
        // Profanity is filtered before slang is normalized.
        let lexicon = Lexicon::builder()
            .slang("anjg", "anjing")
            .profane("anjing")
            .build();
        assert_eq!(cleanse_default("anjg lu", &lexicon), "anjing lu");
        assert_eq!(cleanse_default("anjing lu", &lexicon), "lu");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(cleanse_default("", &lexicon()), "");
        assert_eq!(cleanse_default("   \n\t ", &lexicon()), "");
        assert_eq!(cleanse_default("!!! 123 ???", &lexicon()), "");
    }

    #[test]
    fn test_minimal_preset_skips_lexicon() {
        let options = CleanseOptions::minimal();
        assert!(!options.uses_lexicon());
        let result = cleanse("  Gw yang BANGSAT  ", &lexicon(), &options);
        assert_eq!(result, "gw yang bangsat");
    }

    #[test]
    fn test_non_ascii_is_stripped() {
        let result = cleanse_default("Café ñandú 😀 mantap", &lexicon());
        assert_eq!(result, "caf and mantap");
    }

    #[test]
    fn test_idempotent_on_cleaned_text() {
        let lexicon = lexicon();
        for input in [
            "RT @user: Gw bgt BANGSAT yang di https://t.co/x1 sini!!!",
            "Kenapa sih kampret,,, tdk pernah datang di acara #MalamMinggu",
            "USER USER USER pic.twitter.com/Xyz123 wkwk",
            "RT @USER: RT @USER: x",
            "1rt halo",
            "@rt halo",
            "http://t.co/x rt halo",
            "@user rt halo",
            "yang rt halo",
            "r1t halo",
            "",
        ] {
            let once = cleanse_default(input, &lexicon);
            let twice = cleanse_default(&once, &lexicon);
            assert_eq!(once, twice, "second pass changed {input:?}");
        }
    }
}
