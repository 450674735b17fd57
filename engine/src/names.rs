//! Name normalization and parsing for candidate matching.
//!
//! Scraped sources spell names inconsistently: accents come and go, last
//! names arrive first ("Hassan, Maggie"), nicknames are quoted, suffixes
//! float. Everything is compared in a folded form: NFKD-decomposed with
//! combining marks dropped, lower-cased, punctuation removed.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Fold a name for comparison: "Sánchez" and "SANCHEZ" both become "sanchez",
/// "O'Rourke" becomes "orourke".
#[must_use]
pub fn normalize(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v"];

/// Surname particles that stay attached to the following word.
const PARTICLES: &[&str] = &["de", "del", "della", "di", "da", "la", "le", "van", "von", "st"];

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&normalize(token).as_str())
}

/// A raw name string split into parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub suffix: Option<String>,
    pub nickname: Option<String>,
}

/// A quoted or parenthesized word inside a name.
#[allow(clippy::expect_used)]
static NICKNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["“]([^"”]+)["”]|\(([^)]+)\)"#).expect("nickname pattern compiles"));

/// Parse "Last, First Middle, Suffix" or "First Middle Last Suffix" forms.
///
/// A quoted or parenthesized word is taken as the nickname.
#[must_use]
pub fn parse_name(raw: &str) -> ParsedName {
    let mut parsed = ParsedName::default();
    let mut cleaned = raw.to_string();
    if let Some(caps) = NICKNAME.captures(raw) {
        parsed.nickname = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim().to_string());
        cleaned = NICKNAME.replace_all(raw, " ").into_owned();
    }

    if let Some((last, rest)) = cleaned.split_once(',') {
        parsed.last = non_empty(last);
        let mut given = Vec::new();
        for token in rest.split([',', ' ']).filter(|t| !t.trim().is_empty()) {
            if is_suffix(token) {
                parsed.suffix = Some(token.trim().to_string());
            } else {
                given.push(token.trim());
            }
        }
        assign_given(&mut parsed, &given);
        return parsed;
    }

    let mut tokens: Vec<&str> = cleaned
        .split([' ', ','])
        .filter(|t| !t.trim().is_empty())
        .collect();
    if tokens.len() > 1 && tokens.last().is_some_and(|t| is_suffix(t)) {
        parsed.suffix = tokens.pop().map(str::to_string);
    }
    let Some(mut last_start) = tokens.len().checked_sub(1) else {
        return parsed;
    };
    while last_start > 1 && PARTICLES.contains(&normalize(tokens[last_start - 1]).as_str()) {
        last_start -= 1;
    }
    parsed.last = non_empty(&tokens[last_start..].join(" "));
    assign_given(&mut parsed, &tokens[..last_start]);
    parsed
}

fn assign_given(parsed: &mut ParsedName, given: &[&str]) {
    if let Some((first, middle)) = given.split_first() {
        parsed.first = non_empty(first);
        if !middle.is_empty() {
            parsed.middle = non_empty(&middle.join(" "));
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Formal given names and their common diminutives.
const DIMINUTIVES: &[(&str, &[&str])] = &[
    ("albert", &["al", "bert"]),
    ("alexander", &["alex", "sandy"]),
    ("alfred", &["al", "fred"]),
    ("andrew", &["andy", "drew"]),
    ("anthony", &["tony"]),
    ("benjamin", &["ben"]),
    ("bernard", &["bernie"]),
    ("catherine", &["cathy", "kate"]),
    ("charles", &["chuck", "charlie"]),
    ("christopher", &["chris"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave"]),
    ("deborah", &["debbie", "deb"]),
    ("donald", &["don"]),
    ("douglas", &["doug"]),
    ("edward", &["ed", "eddie", "ted"]),
    ("elizabeth", &["liz", "beth", "betsy", "libby"]),
    ("frederick", &["fred"]),
    ("gerald", &["jerry"]),
    ("gregory", &["greg"]),
    ("harold", &["hal"]),
    ("henry", &["hank"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("jeffrey", &["jeff"]),
    ("jennifer", &["jen", "jenny"]),
    ("john", &["jack", "johnny"]),
    ("joseph", &["joe", "joey"]),
    ("katherine", &["kathy", "kate", "katie"]),
    ("kenneth", &["ken"]),
    ("lawrence", &["larry"]),
    ("margaret", &["maggie", "peggy", "meg"]),
    ("matthew", &["matt"]),
    ("michael", &["mike"]),
    ("mitchell", &["mitch"]),
    ("nicholas", &["nick"]),
    ("nicolas", &["nick"]),
    ("patricia", &["pat", "patty"]),
    ("patrick", &["pat"]),
    ("randall", &["rand", "randy"]),
    ("raymond", &["ray"]),
    ("rebecca", &["becky"]),
    ("richard", &["dick", "rick", "richie"]),
    ("robert", &["bob", "bobby", "rob"]),
    ("ronald", &["ron"]),
    ("samuel", &["sam"]),
    ("stephen", &["steve"]),
    ("steven", &["steve"]),
    ("susan", &["sue"]),
    ("theodore", &["ted"]),
    ("thomas", &["tom", "tommy"]),
    ("timothy", &["tim"]),
    ("vincent", &["vince"]),
    ("william", &["bill", "billy", "will"]),
    ("zachary", &["zach"]),
];

/// Given names equivalent to `first` through the diminutive table, excluding
/// `first` itself. "Nick" yields "nicholas" and "nicolas"; "William" yields
/// "bill", "billy" and "will".
#[must_use]
pub fn name_variants(first: &str) -> Vec<String> {
    let key = normalize(first);
    let mut out: Vec<String> = Vec::new();
    for (formal, short) in DIMINUTIVES {
        if *formal == key {
            out.extend(short.iter().map(|s| (*s).to_string()));
        } else if short.contains(&key.as_str()) {
            out.push((*formal).to_string());
        }
    }
    out.sort();
    out.dedup();
    out
}

/// Compile a last-name pattern with `*` wildcards into an anchored regex over
/// normalized names.
///
/// # Errors
/// Returns the regex error for patterns that cannot compile.
pub fn wildcard(pattern: &str) -> Result<Regex, regex::Error> {
    let parts: Vec<String> = pattern
        .split('*')
        .map(|part| regex::escape(&normalize(part)))
        .collect();
    Regex::new(&format!("^{}$", parts.join(".*")))
}
