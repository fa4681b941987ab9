//! Page number derivation
//!
//! Two sets shape the numbering:
//! - excluded pages get no number and do not advance the count
//! - skipped pages consume a number but the label is not drawn

use crate::options::PageNumberOptions;
use crate::page_range::format_page_ranges;
use crate::types::*;
use std::collections::BTreeSet;

/// Number assigned to one output position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageLabel {
    /// 1-based page position
    pub position: usize,
    /// Counter value consumed by this page, `None` when excluded
    pub value: Option<i64>,
    /// Text to draw, `None` when excluded or skipped
    pub text: Option<String>,
}

/// Read-only numbering rules for a document of `total_pages` pages.
///
/// Build a new plan whenever the options change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNumberingPlan {
    total_pages: usize,
    exclude_set: BTreeSet<usize>,
    skip_set: BTreeSet<usize>,
    start_from: i64,
    style: NumberStyle,
    format: NumberFormat,
}

impl PageNumberingPlan {
    pub fn new(total_pages: usize, options: &PageNumberOptions) -> Self {
        Self {
            total_pages,
            exclude_set: options.exclude.clone(),
            skip_set: options.skip.clone(),
            start_from: options.start_from,
            style: options.style,
            format: options.format,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn style(&self) -> NumberStyle {
        self.style
    }

    pub fn format(&self) -> NumberFormat {
        self.format
    }

    pub fn start_from(&self) -> i64 {
        self.start_from
    }

    pub fn is_excluded(&self, position: usize) -> bool {
        self.exclude_set.contains(&position)
    }

    pub fn is_skipped(&self, position: usize) -> bool {
        !self.is_excluded(position) && self.skip_set.contains(&position)
    }

    /// Number of pages that take part in the count (the "of N" in `PageOfTotal`)
    pub fn denominator(&self) -> usize {
        let excluded = self.exclude_set.range(1..=self.total_pages.max(1)).count();
        self.total_pages.saturating_sub(excluded)
    }

    /// Labels for positions `1..=total_pages`.
    ///
    /// Pages past the point where the counter would exceed `i64::MAX` get no
    /// value.
    pub fn labels(&self) -> Vec<PageLabel> {
        let total = render_numeral(self.denominator() as i64, self.style);
        let mut counter = Some(self.start_from);

        (1..=self.total_pages)
            .map(|position| {
                if self.is_excluded(position) {
                    return PageLabel {
                        position,
                        value: None,
                        text: None,
                    };
                }

                let value = counter;
                counter = counter.and_then(|c| c.checked_add(1));

                let text = value
                    .filter(|_| !self.skip_set.contains(&position))
                    .map(|v| self.format.apply(&render_numeral(v, self.style), &total));

                PageLabel {
                    position,
                    value,
                    text,
                }
            })
            .collect()
    }

    /// Positions that carry a visible label, e.g. `"1,4-5"`
    pub fn labelled_ranges(&self) -> String {
        format_page_ranges(
            self.labels()
                .into_iter()
                .filter(|label| label.text.is_some())
                .map(|label| label.position),
        )
    }
}

/// Render `value` in the given numeral style.
///
/// Roman and alphabetic numerals have no form for zero or negative values;
/// those fall back to decimal, as do Roman values above [`MAX_ROMAN`].
pub fn render_numeral(value: i64, style: NumberStyle) -> String {
    if value <= 0 {
        return value.to_string();
    }

    let n = value as u64;
    match style {
        NumberStyle::Decimal => n.to_string(),
        NumberStyle::UpperRoman | NumberStyle::LowerRoman if n > MAX_ROMAN => n.to_string(),
        NumberStyle::UpperRoman => to_roman(n, true),
        NumberStyle::LowerRoman => to_roman(n, false),
        NumberStyle::UpperAlpha => to_alpha(n, true),
        NumberStyle::LowerAlpha => to_alpha(n, false),
    }
}

/// Largest value written in standard subtractive Roman numerals
pub const MAX_ROMAN: u64 = 3999;

fn to_roman(mut n: u64, uppercase: bool) -> String {
    const NUMERALS: [(u64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut result = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }

    if uppercase {
        result
    } else {
        result.to_lowercase()
    }
}

/// Bijective base-26: 1=A, 26=Z, 27=AA
fn to_alpha(mut n: u64, uppercase: bool) -> String {
    let base = if uppercase { b'A' } else { b'a' };
    let mut letters = Vec::new();

    while n > 0 {
        n -= 1;
        letters.push((base + (n % 26) as u8) as char);
        n /= 26;
    }

    letters.iter().rev().collect()
}
