use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Reserved target value meaning "no explicit language, let the translator infer".
pub const AUTO_LANGUAGE: &str = "auto";

/// Language codes accepted as translation and speech targets, keyed by code.
static LANGUAGES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("af", "afrikaans"),
        ("sq", "albanian"),
        ("am", "amharic"),
        ("ar", "arabic"),
        ("hy", "armenian"),
        ("az", "azerbaijani"),
        ("eu", "basque"),
        ("be", "belarusian"),
        ("bn", "bengali"),
        ("bs", "bosnian"),
        ("bg", "bulgarian"),
        ("ca", "catalan"),
        ("ceb", "cebuano"),
        ("zh", "chinese"),
        ("zh-cn", "chinese (simplified)"),
        ("zh-tw", "chinese (traditional)"),
        ("co", "corsican"),
        ("hr", "croatian"),
        ("cs", "czech"),
        ("da", "danish"),
        ("nl", "dutch"),
        ("en", "english"),
        ("eo", "esperanto"),
        ("et", "estonian"),
        ("fi", "finnish"),
        ("fr", "french"),
        ("fy", "frisian"),
        ("gl", "galician"),
        ("ka", "georgian"),
        ("de", "german"),
        ("el", "greek"),
        ("gu", "gujarati"),
        ("ht", "haitian creole"),
        ("ha", "hausa"),
        ("haw", "hawaiian"),
        ("he", "hebrew"),
        ("hi", "hindi"),
        ("hmn", "hmong"),
        ("hu", "hungarian"),
        ("is", "icelandic"),
        ("ig", "igbo"),
        ("id", "indonesian"),
        ("ga", "irish"),
        ("it", "italian"),
        ("ja", "japanese"),
        ("jv", "javanese"),
        ("kn", "kannada"),
        ("kk", "kazakh"),
        ("km", "khmer"),
        ("ko", "korean"),
        ("ku", "kurdish"),
        ("ky", "kyrgyz"),
        ("lo", "lao"),
        ("la", "latin"),
        ("lv", "latvian"),
        ("lt", "lithuanian"),
        ("lb", "luxembourgish"),
        ("mk", "macedonian"),
        ("mg", "malagasy"),
        ("ms", "malay"),
        ("ml", "malayalam"),
        ("mt", "maltese"),
        ("mi", "maori"),
        ("mr", "marathi"),
        ("mn", "mongolian"),
        ("my", "myanmar (burmese)"),
        ("ne", "nepali"),
        ("no", "norwegian"),
        ("ny", "nyanja (chichewa)"),
        ("or", "odia (oriya)"),
        ("ps", "pashto"),
        ("fa", "persian"),
        ("pl", "polish"),
        ("pt", "portuguese"),
        ("pa", "punjabi"),
        ("ro", "romanian"),
        ("ru", "russian"),
        ("sm", "samoan"),
        ("gd", "scots gaelic"),
        ("sr", "serbian"),
        ("st", "sesotho"),
        ("sn", "shona"),
        ("sd", "sindhi"),
        ("si", "sinhala (sinhalese)"),
        ("sk", "slovak"),
        ("sl", "slovenian"),
        ("so", "somali"),
        ("es", "spanish"),
        ("su", "sundanese"),
        ("sw", "swahili"),
        ("sv", "swedish"),
        ("tg", "tajik"),
        ("ta", "tamil"),
        ("tt", "tatar"),
        ("te", "telugu"),
        ("th", "thai"),
        ("tr", "turkish"),
        ("tk", "turkmen"),
        ("uk", "ukrainian"),
        ("ur", "urdu"),
        ("ug", "uyghur"),
        ("uz", "uzbek"),
        ("vi", "vietnamese"),
        ("cy", "welsh"),
        ("xh", "xhosa"),
        ("yi", "yiddish"),
        ("yo", "yoruba"),
        ("zu", "zulu"),
    ])
});

/// Get the human-readable name for a language code
pub fn lookup(code: &str) -> Option<&'static str> {
    LANGUAGES.get(code).copied()
}

/// Check if a code can be used as a translation target
pub fn is_valid(code: &str) -> bool {
    LANGUAGES.contains_key(code)
}

/// All catalog entries ordered by code
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    LANGUAGES.iter().map(|(code, name)| (*code, *name))
}

/// Normalize user-supplied language input before lookup
pub fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}
