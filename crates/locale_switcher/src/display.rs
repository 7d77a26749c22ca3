//! Self-referential display names ("français (France)", "日本語 (日本)").
//!
//! Covers the languages and regions in the built-in candidate list. Anything
//! else degrades to the raw subtags so a name is always produced.

use crate::locale::Locale;

/// Language names written in the language itself.
const AUTONYMS: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("bg", "български"),
    ("bn", "বাংলা"),
    ("ca", "català"),
    ("cs", "čeština"),
    ("da", "dansk"),
    ("de", "Deutsch"),
    ("el", "Ελληνικά"),
    ("en", "English"),
    ("es", "español"),
    ("et", "eesti"),
    ("fa", "فارسی"),
    ("fi", "suomi"),
    ("fr", "français"),
    ("he", "עברית"),
    ("hi", "हिन्दी"),
    ("hr", "hrvatski"),
    ("hu", "magyar"),
    ("id", "Indonesia"),
    ("it", "italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("lt", "lietuvių"),
    ("lv", "latviešu"),
    ("ms", "Melayu"),
    ("nb", "norsk bokmål"),
    ("nl", "Nederlands"),
    ("pl", "polski"),
    ("pt", "português"),
    ("ro", "română"),
    ("ru", "русский"),
    ("sk", "slovenčina"),
    ("sl", "slovenščina"),
    ("sr", "српски"),
    ("sv", "svenska"),
    ("th", "ไทย"),
    ("tr", "Türkçe"),
    ("uk", "українська"),
    ("vi", "Tiếng Việt"),
    ("zh", "中文"),
];

/// Region names written in the language of the locale they belong to.
const REGION_NAMES: &[(&str, &str, &str)] = &[
    ("ar", "EG", "مصر"),
    ("ar", "SA", "المملكة العربية السعودية"),
    ("ar", "XB", "Pseudo-Bidi"),
    ("bg", "BG", "България"),
    ("ca", "ES", "Espanya"),
    ("cs", "CZ", "Česko"),
    ("da", "DK", "Danmark"),
    ("de", "AT", "Österreich"),
    ("de", "CH", "Schweiz"),
    ("de", "DE", "Deutschland"),
    ("el", "GR", "Ελλάδα"),
    ("en", "AU", "Australia"),
    ("en", "CA", "Canada"),
    ("en", "GB", "United Kingdom"),
    ("en", "IE", "Ireland"),
    ("en", "IN", "India"),
    ("en", "NZ", "New Zealand"),
    ("en", "US", "United States"),
    ("en", "XA", "Pseudo-Accents"),
    ("es", "ES", "España"),
    ("es", "MX", "México"),
    ("es", "US", "Estados Unidos"),
    ("fi", "FI", "Suomi"),
    ("fr", "BE", "Belgique"),
    ("fr", "CA", "Canada"),
    ("fr", "CH", "Suisse"),
    ("fr", "FR", "France"),
    ("he", "IL", "ישראל"),
    ("hi", "IN", "भारत"),
    ("hu", "HU", "Magyarország"),
    ("id", "ID", "Indonesia"),
    ("it", "CH", "Svizzera"),
    ("it", "IT", "Italia"),
    ("ja", "JP", "日本"),
    ("ko", "KR", "대한민국"),
    ("nb", "NO", "Norge"),
    ("nl", "BE", "België"),
    ("nl", "NL", "Nederland"),
    ("pl", "PL", "Polska"),
    ("pt", "BR", "Brasil"),
    ("pt", "PT", "Portugal"),
    ("ro", "RO", "România"),
    ("ru", "RU", "Россия"),
    ("sv", "SE", "Sverige"),
    ("th", "TH", "ไทย"),
    ("tr", "TR", "Türkiye"),
    ("uk", "UA", "Україна"),
    ("vi", "VN", "Việt Nam"),
    ("zh", "CN", "中国"),
    ("zh", "HK", "中國香港特別行政區"),
    ("zh", "TW", "台灣"),
];

/// Name of `locale`'s language, in that language.
pub fn language_autonym(locale: &Locale) -> Option<&'static str> {
    AUTONYMS
        .iter()
        .find(|(code, _)| *code == locale.language())
        .map(|(_, name)| *name)
}

fn region_name(locale: &Locale) -> Option<&'static str> {
    REGION_NAMES
        .iter()
        .find(|(lang, region, _)| *lang == locale.language() && *region == locale.country())
        .map(|(_, _, name)| *name)
}

/// Human-readable name of `locale`, rendered in `locale` itself.
pub fn display_name(locale: &Locale) -> String {
    let language = language_autonym(locale).unwrap_or(locale.language());
    if !locale.has_country() {
        return language.to_string();
    }
    let region = region_name(locale).unwrap_or(locale.country());
    format!("{language} ({region})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_are_self_referential() {
        assert_eq!(display_name(&Locale::new("fr", "FR")), "français (France)");
        assert_eq!(display_name(&Locale::new("de", "CH")), "Deutsch (Schweiz)");
        assert_eq!(display_name(&Locale::new("ja", "JP")), "日本語 (日本)");
    }

    #[test]
    fn language_only_has_no_region_suffix() {
        assert_eq!(display_name(&Locale::new("pt", "")), "português");
    }

    #[test]
    fn unknown_subtags_fall_back_to_codes() {
        assert_eq!(display_name(&Locale::new("fr", "LU")), "français (LU)");
        assert_eq!(display_name(&Locale::new("xx", "YY")), "xx (YY)");
    }

    #[test]
    fn pseudo_locales_have_names() {
        assert_eq!(display_name(&Locale::new("en", "XA")), "English (Pseudo-Accents)");
        assert_eq!(display_name(&Locale::new("ar", "XB")), "العربية (Pseudo-Bidi)");
    }
}
