use crate::core::observer::ExtractionObserver;
use crate::error::VerificationError;
use crate::models::{ExtractedProfile, ProfileField};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};
use std::fmt;
use std::sync::LazyLock;

/// A named, pure lookup that may recover one field from the page
type Strategy<T> = (&'static str, fn(&Html) -> Option<T>);

/// Name lookups, most specific first
const NAME_STRATEGIES: &[Strategy<String>] = &[
    ("hero_name", name_from_hero),
    ("h1", name_from_h1),
    ("meta_title", name_from_meta_title),
    ("page_title", name_from_page_title),
];

const COUNTRY_STRATEGIES: &[Strategy<String>] = &[("text_node", country_from_text_nodes)];

const AGE_STRATEGIES: &[Strategy<AgeReading>] = &[
    ("age_with_birth_date", age_from_birth_date_text),
    ("age_table_row", age_from_table_rows),
];

const RANKING_STRATEGIES: &[Strategy<u32>] = &[("stat_value", ranking_from_stat_values)];

/// Elements the ATP site has used for the player name in profile heroes
const HERO_NAME_SELECTORS: &[&str] = &[".player-profile-hero-name", ".player_name", ".hero-name"];

const META_TITLE_SELECTORS: &[&str] = &[
    r#"meta[property="og:title"]"#,
    r#"meta[name="twitter:title"]"#,
    r#"meta[name="title"]"#,
];

/// Trailing site branding removed from page titles
const TITLE_SUFFIXES: &[&str] = &[" - ATP Tour", " - ATP"];

/// Country names and codes recognised as a whole text node. Kept narrow so
/// that the first hit in document order is predictable.
const COUNTRY_NAMES: &[&str] = &[
    "United States", "USA",
    "United Kingdom", "UK", "Great Britain", "GBR",
    "Spain", "ESP",
    "France", "FRA",
    "Switzerland", "SUI",
    "Serbia", "SRB",
    "Italy", "ITA",
    "Germany", "GER",
    "Australia", "AUS",
    "Argentina", "ARG",
    "Canada", "CAN",
    "Russia", "RUS",
    "Greece", "GRE",
    "Norway", "NOR",
    "Denmark", "DEN",
    "Poland", "POL",
    "Japan", "JPN",
];

const RANKING_SELECTOR: &str = ".stat-value, .stat, .stat-number, .data-number, .rank";

/// Rankings outside (0, MAX_RANKING) are treated as unrelated numbers
const MAX_RANKING: u32 = 2000;

/// "24 (1999.05.02)" style age followed by the birth date
static AGE_WITH_BIRTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(\d{2})\s*\(\s*(\d{4})[./-](\d{1,2})[./-](\d{1,2})\s*\)")
        .expect("age pattern is valid")
});

static STANDALONE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}$").expect("integer pattern is valid"));

/// Age recovered from the page, with the birth date when it was printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeReading {
    pub age: u8,
    pub date_of_birth: Option<NaiveDate>,
}

impl fmt::Display for AgeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date_of_birth {
            Some(dob) => write!(f, "{} ({})", self.age, dob),
            None => write!(f, "{}", self.age),
        }
    }
}

/// Extract the player profile from raw profile-page HTML
///
/// Every field is looked up through its own waterfall of strategies; the
/// first strategy that yields a value wins and every attempt is reported to
/// `observer`. Only a missing name is fatal.
pub fn extract_profile(
    html: &str,
    observer: &dyn ExtractionObserver,
) -> Result<ExtractedProfile, VerificationError> {
    let document = Html::parse_document(html);

    let name = run_waterfall(&document, ProfileField::Name, NAME_STRATEGIES, observer)
        .ok_or(VerificationError::Parse)?;
    let (first_name, last_name) = split_name(&name);

    let country = run_waterfall(&document, ProfileField::Country, COUNTRY_STRATEGIES, observer)
        .unwrap_or_default();

    let age = run_waterfall(&document, ProfileField::Age, AGE_STRATEGIES, observer);

    let current_ranking =
        run_waterfall(&document, ProfileField::Ranking, RANKING_STRATEGIES, observer);

    Ok(ExtractedProfile {
        first_name,
        last_name,
        country,
        date_of_birth: age.and_then(|a| a.date_of_birth),
        age: age.map(|a| a.age).unwrap_or(0),
        current_ranking,
        profile_exists: true,
    })
}

/// Try strategies in order until one yields a value
fn run_waterfall<T: fmt::Display>(
    document: &Html,
    field: ProfileField,
    strategies: &[Strategy<T>],
    observer: &dyn ExtractionObserver,
) -> Option<T> {
    for (name, strategy) in strategies {
        let found = strategy(document);
        let shown = found.as_ref().map(|v| v.to_string());
        observer.attempt(field, *name, shown.as_deref());
        if found.is_some() {
            return found;
        }
    }
    None
}

/// First token is the first name, the rest the last name. A single token is
/// used for both.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");

    if rest.is_empty() {
        (first.clone(), first)
    } else {
        (first, rest)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first element matching `selector` that has any
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(|el| collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
        .find(|text| !text.is_empty())
}

/// Non-empty, trimmed text nodes in document order, skipping script and style
fn text_nodes(document: &Html) -> impl Iterator<Item = &str> + '_ {
    document.tree.root().descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let parent = node
            .parent()
            .and_then(|p| p.value().as_element().map(|el| el.name()));
        if matches!(parent, Some("script") | Some("style")) {
            return None;
        }
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

fn strip_title_suffix(title: &str) -> String {
    let mut name = title.split('|').next().unwrap_or_default().trim();
    for suffix in TITLE_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.trim();
        }
    }
    collapse_whitespace(name)
}

fn name_from_hero(document: &Html) -> Option<String> {
    HERO_NAME_SELECTORS
        .iter()
        .find_map(|selector| first_text(document, selector))
}

fn name_from_h1(document: &Html) -> Option<String> {
    first_text(document, "h1")
}

fn name_from_meta_title(document: &Html) -> Option<String> {
    META_TITLE_SELECTORS.iter().find_map(|selector| {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .filter_map(|el| el.value().attr("content"))
            .map(strip_title_suffix)
            .find(|name| !name.is_empty())
    })
}

fn name_from_page_title(document: &Html) -> Option<String> {
    first_text(document, "title")
        .map(|title| strip_title_suffix(&title))
        .filter(|name| !name.is_empty())
}

fn country_from_text_nodes(document: &Html) -> Option<String> {
    text_nodes(document)
        .find(|text| COUNTRY_NAMES.contains(text))
        .map(str::to_string)
}

fn age_from_birth_date_text(document: &Html) -> Option<AgeReading> {
    text_nodes(document).find_map(|text| {
        let caps = AGE_WITH_BIRTH_DATE.captures(text)?;
        let age: u8 = caps[1].parse().ok().filter(|age| *age > 0)?;
        let date_of_birth = NaiveDate::from_ymd_opt(
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
            caps[4].parse().ok()?,
        );
        Some(AgeReading { age, date_of_birth })
    })
}

fn age_from_table_rows(document: &Html) -> Option<AgeReading> {
    let rows = Selector::parse("tr").ok()?;
    let cells = Selector::parse("td, th").ok()?;

    document.select(&rows).find_map(|row| {
        let values: Vec<String> = row
            .select(&cells)
            .map(|cell| collapse_whitespace(&cell.text().collect::<Vec<_>>().join(" ")))
            .collect();
        let [label, value] = values.as_slice() else {
            return None;
        };
        if !label.to_lowercase().contains("age") || !STANDALONE_INTEGER.is_match(value) {
            return None;
        }
        let age: u8 = value.parse().ok().filter(|age| *age > 0)?;
        Some(AgeReading {
            age,
            date_of_birth: None,
        })
    })
}

fn ranking_from_stat_values(document: &Html) -> Option<u32> {
    let selector = Selector::parse(RANKING_SELECTOR).ok()?;
    document.select(&selector).find_map(|el| {
        let digits: String = el
            .text()
            .flat_map(str::chars)
            .filter(char::is_ascii_digit)
            .collect();
        digits
            .parse::<u32>()
            .ok()
            .filter(|rank| *rank > 0 && *rank < MAX_RANKING)
    })
}
