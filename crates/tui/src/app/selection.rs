//! Picks one account out of free text typed in the account list.

use engine::Account;

const VERBS: &[&str] = &["open ", "view ", "select "];

/// Resolve `input` against the filtered list first, then every account.
///
/// Order of attempts: blank input with a single filtered entry, a 1-based
/// index into `filtered`, an exact case-insensitive name, then a unique
/// case-insensitive name prefix within one list.
pub fn resolve_account<'a>(
    input: &str,
    filtered: &'a [Account],
    all: &'a [Account],
) -> Option<&'a Account> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return match filtered {
            [only] => Some(only),
            _ => None,
        };
    }

    let query = strip_verb(trimmed);
    if query.is_empty() {
        return None;
    }

    if let Ok(index) = query.parse::<usize>() {
        if (1..=filtered.len()).contains(&index) {
            return filtered.get(index - 1);
        }
    }

    let lists = [filtered, all];
    if let Some(exact) = lists
        .iter()
        .flat_map(|list| list.iter())
        .find(|account| account.name.to_lowercase() == query.to_lowercase())
    {
        return Some(exact);
    }

    let prefix = query.to_lowercase();
    for list in lists {
        let mut matches = list
            .iter()
            .filter(|account| account.name.to_lowercase().starts_with(&prefix));
        if let (Some(only), None) = (matches.next(), matches.next()) {
            return Some(only);
        }
    }
    None
}

/// Search term for live filtering, or `None` when `input` should leave the
/// current filter alone (an index or an `import` command).
pub fn filter_term(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.to_lowercase().starts_with("import ") {
        return None;
    }
    let query = strip_verb(trimmed);
    if query.parse::<usize>().is_ok() {
        return None;
    }
    Some(query)
}

fn strip_verb(input: &str) -> &str {
    let lower = input.to_lowercase();
    if let Some(verb) = VERBS.iter().find(|verb| lower.starts_with(*verb)) {
        return input.get(verb.len()..).unwrap_or_default().trim();
    }
    if let Some(rest) = input.strip_prefix('#') {
        return rest.trim();
    }
    input
}
