//! Search query expansion.
//!
//! The store only substring-matches on the full item label, so a generic
//! search like "dolunay" has to be expanded into one query per enhancement
//! level to sweep the whole equipment family.

/// Short/slang names players actually type, mapped to full item labels.
static SLANG: &[(&str, &str)] = &[
    ("dolunay", "Dolunay Kılıcı"),
    ("kdp", "Kırmızı Demir Pala"),
    ("syk", "Siyah Yuvarlak Kalkan"),
    ("gby", "Geyik Boynuzu Yay"),
    ("zehir", "Zehir Kılıcı"),
    ("kin", "Kin Kılıcı"),
    ("siyah çelik", "Siyah Çelik Zırh"),
    ("mavi çelik", "Mavi Çelik Zırh"),
    ("beşgen", "Beşgen Kalkan"),
    ("orkide", "Orkide Çan"),
    ("aslan ağzı", "Aslan Ağzı Kalkan"),
    ("sahine", "Şahin Kalkan"),
    ("kaplan", "Kaplan Kalkan"),
    ("abonoz", "Abonoz Küpe"),
    ("cennet", "Cennetin Gözü Kolye"),
];

/// Number of enhancement levels swept for a generic search (+0 through +9).
const ENHANCEMENT_LEVELS: u32 = 10;

/// Resolves a slang name to its canonical item label, identity when absent.
pub fn canonical_name(query: &str) -> String {
    let lower = query.to_lowercase();
    SLANG
        .iter()
        .find(|(slang, _)| *slang == lower)
        .map(|(_, full)| (*full).to_string())
        .unwrap_or_else(|| query.to_string())
}

/// Expands a raw user search into the ordered list of queries to execute.
///
/// A query already carrying a level marker (`+`) is returned unchanged as the
/// sole entry. Otherwise the canonical base name is emitted first, followed by
/// `base+0` through `base+9`. Order defines crawl and persistence-scope order.
pub fn expand(query: &str) -> Vec<String> {
    if query.contains('+') {
        return vec![query.to_string()];
    }

    let base = canonical_name(query);
    let mut queries = Vec::with_capacity(1 + ENHANCEMENT_LEVELS as usize);
    queries.push(base.clone());
    for level in 0..ENHANCEMENT_LEVELS {
        queries.push(format!("{}+{}", base, level));
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_generic_search() {
        let queries = expand("Dolunay");
        assert_eq!(queries.len(), 11);
        assert_eq!(queries[0], "Dolunay Kılıcı");
        assert_eq!(queries[1], "Dolunay Kılıcı+0");
        assert_eq!(queries[10], "Dolunay Kılıcı+9");
    }

    #[test]
    fn test_expand_level_search_is_identity() {
        assert_eq!(expand("Dolunay+9"), vec!["Dolunay+9".to_string()]);
        assert_eq!(expand("Kin Kılıcı+3"), vec!["Kin Kılıcı+3".to_string()]);
    }

    #[test]
    fn test_expand_unknown_name_keeps_input() {
        let queries = expand("Ejderha Taşı");
        assert_eq!(queries[0], "Ejderha Taşı");
        assert_eq!(queries.len(), 11);
    }

    #[test]
    fn test_canonical_name_lookup() {
        assert_eq!(canonical_name("kin"), "Kin Kılıcı");
        assert_eq!(canonical_name("KIN"), "Kin Kılıcı".to_string());
        assert_eq!(canonical_name("unknown"), "unknown");
    }
}
