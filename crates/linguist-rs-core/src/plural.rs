//! Locale plural-category rules.
//!
//! Qt Linguist catalogues store pluralized translations as an ordered list of
//! `numerusform` texts. The target language decides how many forms exist and
//! which form a given cardinal count selects. This module maps language codes
//! to rule groups and cardinal counts to form indices.
//!
//! The rule groups follow the tables Qt's `lrelease` ships: most languages
//! collapse into a handful of groups rather than carrying one rule each.

use serde::{Deserialize, Serialize};

/// A plural rule group shared by one or more languages.
///
/// Each variant defines an ordered set of plural forms and a function from a
/// cardinal count to an index into that set.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::plural::PluralRule;
///
/// let rule = PluralRule::for_language("ru");
/// assert_eq!(rule.form_count(), 3);
/// assert_eq!(rule.index(1), 0);  // 1 сообщение
/// assert_eq!(rule.index(3), 1);  // 3 сообщения
/// assert_eq!(rule.index(11), 2); // 11 сообщений
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluralRule {
    /// One form for every count (Japanese, Chinese, Korean, Thai, ...).
    Single,
    /// Two forms; the first is used only when `n == 1` (English, German,
    /// Dutch, Italian, Spanish, ...).
    TwoFormsNotOne,
    /// Two forms; the first is used when `n <= 1` (French, Brazilian
    /// Portuguese, ...).
    TwoFormsZeroOne,
    /// Three forms with the East-Slavic one/few/many split (Russian,
    /// Ukrainian, Belarusian, Serbian, Croatian, Bosnian).
    Slavic,
    /// Three forms with the Polish few/many split.
    Polish,
    /// Three forms: `n == 1`, `2..=4`, everything else (Czech, Slovak).
    CzechSlovak,
    /// Six forms: zero/one/two/few/many/other (Arabic).
    Arabic,
}

impl PluralRule {
    /// Resolves a language code to its plural rule group.
    ///
    /// Accepts bare ISO 639-1 codes (`"ru"`) as well as BCP47-ish codes with
    /// a region subtag in either separator convention (`"pt-BR"`, `"pt_BR"`,
    /// `"ru-RU"`). Matching is case-insensitive.
    ///
    /// Unknown languages fall back to [`PluralRule::TwoFormsNotOne`], the
    /// most common grouping, with a warning record.
    pub fn for_language(code: &str) -> Self {
        let (language, region) = split_language_code(code);

        match language.as_str() {
            "ja" | "zh" | "ko" | "th" | "vi" | "id" => Self::Single,
            "en" | "de" | "nl" | "sv" | "da" | "no" | "nb" | "nn" | "fi" | "et" | "it" | "es"
            | "ca" | "el" | "he" | "hu" | "eu" | "bg" | "tr" => Self::TwoFormsNotOne,
            "fr" => Self::TwoFormsZeroOne,
            "pt" => {
                if region.as_deref() == Some("br") {
                    Self::TwoFormsZeroOne
                } else {
                    Self::TwoFormsNotOne
                }
            }
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Slavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::CzechSlovak,
            "ar" => Self::Arabic,
            _ => {
                tracing::warn!(
                    language = %code,
                    "no plural rule registered for language, assuming two forms"
                );
                Self::TwoFormsNotOne
            }
        }
    }

    /// Returns the number of `numerusform` entries this rule requires.
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::TwoFormsNotOne | Self::TwoFormsZeroOne => 2,
            Self::Slavic | Self::Polish | Self::CzechSlovak => 3,
            Self::Arabic => 6,
        }
    }

    /// Returns the form index selected by the cardinal count `n`.
    ///
    /// The returned index is always less than [`form_count`](Self::form_count).
    pub const fn index(self, n: u64) -> usize {
        match self {
            Self::Single => 0,
            Self::TwoFormsNotOne => {
                if n == 1 {
                    0
                } else {
                    1
                }
            }
            Self::TwoFormsZeroOne => {
                if n <= 1 {
                    0
                } else {
                    1
                }
            }
            Self::Slavic => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if matches!(n % 10, 2..=4) && !matches!(n % 100, 12..=14) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if matches!(n % 10, 2..=4) && !matches!(n % 100, 12..=14) {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => match n % 100 {
                    3..=10 => 3,
                    11..=99 => 4,
                    _ => 5,
                },
            },
        }
    }
}

/// Splits a language code into lowercase `(language, region)` parts.
///
/// `"pt-BR"` and `"pt_BR"` both yield `("pt", Some("br"))`; a bare `"ru"`
/// yields `("ru", None)`.
fn split_language_code(code: &str) -> (String, Option<String>) {
    let lowered = code.to_lowercase();
    let mut parts = lowered.splitn(2, ['-', '_']);
    let language = parts.next().unwrap_or_default().to_string();
    let region = parts.next().map(ToString::to_string);
    (language, region)
}
