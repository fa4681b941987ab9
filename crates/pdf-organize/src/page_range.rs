//! Conversion between page sets and the range strings external tools take
//! (`"1-5,8,10-12"`, inclusive and 1-based).

use crate::constants::MAX_PAGE_NUMBER;
use crate::types::*;
use std::collections::BTreeSet;

/// Format a set of 1-based pages as sorted, merged ranges.
/// Duplicates and zeros are dropped.
pub fn format_page_ranges(pages: impl IntoIterator<Item = usize>) -> String {
    let pages: BTreeSet<usize> = pages.into_iter().filter(|&p| p > 0).collect();
    format_runs(pages)
}

/// Format an ordered page list, keeping its order.
///
/// Only ascending consecutive runs are merged, so `[3, 1, 2, 4]` becomes
/// `"3,1-2,4"`.
pub fn format_page_sequence(pages: &[usize]) -> String {
    format_runs(pages.iter().copied().filter(|&p| p > 0))
}

fn format_runs(pages: impl IntoIterator<Item = usize>) -> String {
    let mut parts = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for page in pages {
        run = match run {
            Some((start, end)) if page == end + 1 => Some((start, page)),
            Some(finished) => {
                parts.push(format_run(finished));
                Some((page, page))
            }
            None => Some((page, page)),
        };
    }
    if let Some(finished) = run {
        parts.push(format_run(finished));
    }

    parts.join(",")
}

fn format_run((start, end): (usize, usize)) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

/// Parse a user-entered list such as `"1, 3-5, 9"` into a set of 1-based pages.
///
/// Empty tokens are ignored; an empty string yields an empty set. Pages above
/// [`MAX_PAGE_NUMBER`] are rejected.
pub fn parse_page_list(text: &str) -> Result<BTreeSet<usize>> {
    let mut pages = BTreeSet::new();

    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page(start.trim(), token)?;
                let end = parse_page(end.trim(), token)?;
                if start > end {
                    return Err(OrganizeError::InvalidInput(format!(
                        "reversed page range '{}'",
                        token
                    )));
                }
                pages.extend(start..=end);
            }
            None => {
                pages.insert(parse_page(token, token)?);
            }
        }
    }

    Ok(pages)
}

fn parse_page(value: &str, token: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(page) if page > MAX_PAGE_NUMBER => Err(OrganizeError::InvalidInput(format!(
            "page {} in '{}' exceeds the limit of {}",
            page, token, MAX_PAGE_NUMBER
        ))),
        Ok(page) if page > 0 => Ok(page),
        _ => Err(OrganizeError::InvalidInput(format!(
            "invalid page '{}'",
            token
        ))),
    }
}
