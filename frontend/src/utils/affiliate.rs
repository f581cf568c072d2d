use url::Url;

/// Host fragment and query parameter appended for each partner shop.
const AFFILIATE_TAGS: &[(&str, &str)] = &[
    ("shopee", "af=tempo_aff"),
    ("lazada", "spm=tempo_aff"),
    ("amazon", "tag=tempo-20"),
];

/// Appends the partner tag for known shop hosts. Other hosts and
/// unparsable input come back unchanged.
pub fn affiliate_link(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };
    let Some(host) = url.host_str() else {
        return raw.to_string();
    };
    let Some((_, tag)) = AFFILIATE_TAGS
        .iter()
        .find(|(domain, _)| host.contains(domain))
    else {
        return raw.to_string();
    };

    let (base, fragment) = match raw.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (raw, None),
    };
    let separator = match url.query() {
        Some(query) if !query.is_empty() => "&",
        Some(_) => "",
        None => "?",
    };
    let mut link = format!("{}{}{}", base, separator, tag);
    if let Some(fragment) = fragment {
        link.push('#');
        link.push_str(fragment);
    }
    link
}
