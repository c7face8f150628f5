use crate::domain::nutrition::entities::BrandInfo;

struct BrandEntry {
    key: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
}

impl BrandEntry {
    const fn new(
        key: &'static str,
        name: &'static str,
        icon: &'static str,
        color: &'static str,
    ) -> Self {
        Self {
            key,
            name,
            icon,
            color,
        }
    }

    fn to_info(&self) -> BrandInfo {
        BrandInfo {
            name: self.name.to_string(),
            icon: self.icon.to_string(),
            color: self.color.to_string(),
        }
    }
}

/// Lowercase substring keys. Order is the tie-break: multi-word keys first.
static BRANDS: &[BrandEntry] = &[
    BrandEntry::new("burger king", "Burger King", "👑", "#D62300"),
    BrandEntry::new("five guys", "Five Guys", "🍔", "#E31837"),
    BrandEntry::new("pizza express", "PizzaExpress", "🍕", "#0A1E3F"),
    BrandEntry::new("pizza hut", "Pizza Hut", "🍕", "#EE3A43"),
    BrandEntry::new("taco bell", "Taco Bell", "🌮", "#702082"),
    BrandEntry::new("caffe nero", "Caffè Nero", "☕", "#1A1A1A"),
    BrandEntry::new("caffè nero", "Caffè Nero", "☕", "#1A1A1A"),
    BrandEntry::new("marks & spencer", "M&S", "🛍️", "#000000"),
    BrandEntry::new("mcdonald", "McDonald's", "🍟", "#FFC72C"),
    BrandEntry::new("starbucks", "Starbucks", "☕", "#00704A"),
    BrandEntry::new("costa", "Costa Coffee", "☕", "#6D1F37"),
    BrandEntry::new("greggs", "Greggs", "🥐", "#00529B"),
    BrandEntry::new("nando", "Nando's", "🌶️", "#D4252C"),
    BrandEntry::new("subway", "Subway", "🥪", "#008C15"),
    BrandEntry::new("domino", "Domino's", "🍕", "#006491"),
    BrandEntry::new("wagamama", "Wagamama", "🍜", "#E60012"),
    BrandEntry::new("wetherspoon", "Wetherspoons", "🍺", "#1B365D"),
    BrandEntry::new("itsu", "itsu", "🍱", "#E4007C"),
    BrandEntry::new("leon", "LEON", "🥗", "#1D1D1B"),
    BrandEntry::new("kfc", "KFC", "🍗", "#A3080C"),
    BrandEntry::new("pret", "Pret A Manger", "🥪", "#862633"),
    BrandEntry::new("tesco", "Tesco", "🛒", "#00539F"),
    BrandEntry::new("sainsbury", "Sainsbury's", "🛒", "#F06C00"),
    BrandEntry::new("m&s", "M&S", "🛍️", "#000000"),
];

/// Fallback spellings, tried only when no key in `BRANDS` matched.
static BRAND_ALIASES: &[(&str, &str)] = &[
    ("mcd", "mcdonald"),
    ("maccies", "mcdonald"),
    ("mickey d", "mcdonald"),
    ("sbux", "starbucks"),
];

/// Returns the brand named in a free-form context string, if any.
///
/// First match in dictionary order wins. A key only matches where a word
/// starts, so "leon" is not found in "napoleon". Aliases are only consulted
/// when no direct key matched.
pub fn match_brand(context: Option<&str>) -> Option<BrandInfo> {
    let context = context?.to_lowercase();
    if context.trim().is_empty() {
        return None;
    }

    if let Some(entry) = BRANDS
        .iter()
        .find(|entry| contains_at_word_start(&context, entry.key))
    {
        return Some(entry.to_info());
    }

    BRAND_ALIASES
        .iter()
        .find(|(alias, _)| contains_at_word_start(&context, alias))
        .and_then(|(_, key)| BRANDS.iter().find(|entry| entry.key == *key))
        .map(BrandEntry::to_info)
}

fn contains_at_word_start(text: &str, key: &str) -> bool {
    text.match_indices(key).any(|(start, _)| {
        text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}
