//! CLDR-backed plurality.
//!
//! A plural group resolved with [`CldrPlurality`] has one zone per CLDR
//! category the language uses, in the order zero, one, two, few, many,
//! other. English therefore takes two zones, Russian four, Arabic six.
//!
//! Plural rules are cached per thread per language, the same way the
//! rules for the other formatting paths are.

use std::cell::RefCell;

use icu_locale_core::locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use super::{PluralValue, Plurality};

/// Language codes with built-in rules. Anything else falls back to English.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "th", "tr", "uk", "vi", "zh",
];

struct CachedRules {
    lang: &'static str,
    rules: PluralRules,
    categories: Vec<PluralCategory>,
}

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<CachedRules>> = const { RefCell::new(Vec::new()) };
}

/// Zone selection following the CLDR cardinal rules of a language.
///
/// # Example
///
/// ```
/// use markloc::plurality::{CldrPlurality, Plurality, PluralValue};
///
/// let russian = CldrPlurality::new("ru");
/// // one, few, many, other
/// assert_eq!(russian.zone_index(&PluralValue::Int(1), 4), 0);
/// assert_eq!(russian.zone_index(&PluralValue::Int(3), 4), 1);
/// assert_eq!(russian.zone_index(&PluralValue::Int(5), 4), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CldrPlurality {
    language: &'static str,
}

impl CldrPlurality {
    /// Unknown language codes use the English rules.
    pub fn new(language: &str) -> Self {
        Self {
            language: normalize_lang(language),
        }
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    /// The categories this language distinguishes, in zone order.
    pub fn categories(&self) -> Vec<PluralCategory> {
        with_rules(self.language, |cached| cached.categories.clone()).unwrap_or_default()
    }
}

impl Plurality for CldrPlurality {
    fn zone_index(&self, value: &PluralValue, zone_count: usize) -> usize {
        let last = zone_count.saturating_sub(1);
        with_rules(self.language, |cached| {
            let category = match integral(value) {
                Some(n) => cached.rules.category_for(n),
                None => PluralCategory::Other,
            };
            cached
                .categories
                .iter()
                .position(|c| *c == category)
                .unwrap_or(last)
        })
        .unwrap_or(last)
    }
}

/// Fractional values only take the integer rules when they are integral
/// within their precision.
fn integral(value: &PluralValue) -> Option<i64> {
    match value {
        PluralValue::Int(n) => Some(*n),
        PluralValue::Float { value, precision } => {
            let rounded = value.round();
            ((value - rounded).abs() <= *precision && rounded.is_finite()).then_some(rounded as i64)
        }
    }
}

fn normalize_lang(lang: &str) -> &'static str {
    let primary = lang.split(['-', '_']).next().unwrap_or(lang).to_ascii_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&code| code == primary)
        .copied()
        .unwrap_or("en")
}

fn with_rules<T>(lang: &'static str, f: impl FnOnce(&CachedRules) -> T) -> Option<T> {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(cached) = cache.iter().find(|cached| cached.lang == lang) {
            return Some(f(cached));
        }
        let rules = build_rules(lang)?;
        let mut categories: Vec<PluralCategory> = rules.categories().collect();
        categories.sort_by_key(|c| category_rank(*c));
        let cached = CachedRules {
            lang,
            rules,
            categories,
        };
        let result = f(&cached);
        cache.push(cached);
        Some(result)
    })
}

fn category_rank(category: PluralCategory) -> u8 {
    match category {
        PluralCategory::Zero => 0,
        PluralCategory::One => 1,
        PluralCategory::Two => 2,
        PluralCategory::Few => 3,
        PluralCategory::Many => 4,
        PluralCategory::Other => 5,
    }
}

fn build_rules(lang: &'static str) -> Option<PluralRules> {
    let loc = match lang {
        "ru" => locale!("ru"),
        "ar" => locale!("ar"),
        "de" => locale!("de"),
        "es" => locale!("es"),
        "fr" => locale!("fr"),
        "it" => locale!("it"),
        "pt" => locale!("pt"),
        "ja" => locale!("ja"),
        "zh" => locale!("zh"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "th" => locale!("th"),
        "id" => locale!("id"),
        "el" => locale!("el"),
        "ro" => locale!("ro"),
        "fa" => locale!("fa"),
        "bn" => locale!("bn"),
        "hi" => locale!("hi"),
        "he" => locale!("he"),
        _ => locale!("en"),
    };
    match PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()) {
        Ok(rules) => Some(rules),
        Err(error) => {
            tracing::warn!(lang, %error, "could not load plural rules");
            None
        }
    }
}
