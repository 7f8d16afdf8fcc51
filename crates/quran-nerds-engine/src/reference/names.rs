//! Chapter name normalization.
//!
//! Chapter names reach us spelled many ways: `Al-Baqarah` (quran.com),
//! `Al-Baqara` (alquran.cloud), `Baqara`, `al baqara`, `Surah Al-Baqara`.
//! Index keys and lookup candidates are both derived here so that the two
//! sides agree.

use std::sync::LazyLock;

use regex::Regex;

static SURAH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^surah\s+").expect("valid surah prefix regex"));

/// Articles stripped from a looked-up name.
static LOOKUP_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:al|an|at|as)-").expect("valid article regex"));

/// Articles stripped from canonical names when building the index. Wider than
/// the lookup set so `Rahman` finds `Ar-Rahman`.
static INDEX_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:al|an|ar|as|ash|at|ath|ad|adh|az)-").expect("valid article regex")
});

/// Lowercases, unifies apostrophes and collapses whitespace.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .replace(['’', '‘', '`'], "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn strip_surah_prefix(name: &str) -> &str {
    match SURAH_PREFIX.find(name) {
        Some(m) => &name[m.end()..],
        None => name,
    }
}

fn strip_article<'a>(article: &Regex, name: &'a str) -> &'a str {
    match article.find(name) {
        Some(m) => &name[m.end()..],
        None => name,
    }
}

pub fn strip_lookup_article(name: &str) -> &str {
    strip_article(&LOOKUP_ARTICLE, name)
}

/// `al baqara`, `al-baqara` -> `albaqara`
pub fn compact(name: &str) -> String {
    name.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// `faatiha` -> `fatiha`, `an-naas` -> `an-nas`
pub fn collapse_vowels(name: &str) -> String {
    name.replace("aa", "a").replace("ee", "e").replace("oo", "o")
}

/// Keys under which a canonical chapter name is indexed.
///
/// The first key is the lowercased name itself.
pub fn index_keys(canonical: &str) -> Vec<String> {
    let name = normalize_name(canonical);
    let stripped = strip_article(&INDEX_ARTICLE, &name).to_string();

    let mut keys: Vec<String> = vec![];
    let mut add = |key: String| {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    };

    for base in [name.clone(), stripped] {
        let compacted = compact(&base);
        let collapsed = collapse_vowels(&base);
        let variants = [
            base.clone(),
            compacted.clone(),
            collapsed,
            collapse_vowels(&compacted),
        ];
        for variant in variants {
            // quran.com spells `Al-Fatihah` where alquran.cloud has `Al-Faatiha`.
            if let Some(without_h) = variant.strip_suffix('h')
                && without_h.len() > 2
            {
                add(without_h.to_string());
            }
            add(variant);
        }
    }

    // Keep the lowercased canonical name first.
    if let Some(pos) = keys.iter().position(|k| *k == name) {
        let canonical_key = keys.remove(pos);
        keys.insert(0, canonical_key);
    }
    keys
}

/// Candidate keys for a looked-up name, in the order they are tried:
///
/// 1. the normalized name
/// 2. without a leading `surah `
/// 3. without a leading `al-`, `an-`, `at-` or `as-`
/// 4. without spaces and hyphens
/// 5. doubled vowels collapsed, article stripped
pub fn lookup_candidates(name: &str) -> Vec<String> {
    let name = normalize_name(name);
    let without_surah = strip_surah_prefix(&name).to_string();
    let without_article = strip_lookup_article(&without_surah).to_string();
    let compacted = compact(&without_surah);
    let collapsed = collapse_vowels(&without_article);

    let mut candidates: Vec<String> = vec![];
    for candidate in [name, without_surah, without_article, compacted, collapsed] {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}
