use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Page {0} not found or already deleted")]
    NotFound(usize),
    #[error("No pages left in the output")]
    EmptyResult,
    #[error("Session already finalized")]
    Finalized,
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, OrganizeError>;

/// Numeral system used to render a page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberStyle {
    /// 1, 2, 3
    #[default]
    Decimal,
    /// I, II, III
    UpperRoman,
    /// i, ii, iii
    LowerRoman,
    /// A, B, ... Z, AA
    UpperAlpha,
    /// a, b, ... z, aa
    LowerAlpha,
}

impl NumberStyle {
    pub const ALL: [NumberStyle; 5] = [
        NumberStyle::Decimal,
        NumberStyle::UpperRoman,
        NumberStyle::LowerRoman,
        NumberStyle::UpperAlpha,
        NumberStyle::LowerAlpha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumberStyle::Decimal => "decimal",
            NumberStyle::UpperRoman => "upper-roman",
            NumberStyle::LowerRoman => "lower-roman",
            NumberStyle::UpperAlpha => "upper-alpha",
            NumberStyle::LowerAlpha => "lower-alpha",
        }
    }
}

impl fmt::Display for NumberStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberStyle {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_name(s);
        NumberStyle::ALL
            .into_iter()
            .find(|style| normalize_name(style.name()) == key)
            .ok_or_else(|| OrganizeError::InvalidInput(format!("unknown number style '{}'", s)))
    }
}

/// Text template wrapped around a rendered page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// `7`
    #[default]
    Number,
    /// `Page 7 of 12`
    PageOfTotal,
    /// `Page 7`
    PageX,
    /// `[7]`
    Brackets,
    /// `- 7 -`
    Dashes,
}

impl NumberFormat {
    pub const ALL: [NumberFormat; 5] = [
        NumberFormat::Number,
        NumberFormat::PageOfTotal,
        NumberFormat::PageX,
        NumberFormat::Brackets,
        NumberFormat::Dashes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumberFormat::Number => "number",
            NumberFormat::PageOfTotal => "page-of-total",
            NumberFormat::PageX => "page-x",
            NumberFormat::Brackets => "brackets",
            NumberFormat::Dashes => "dashes",
        }
    }

    /// Apply the template to an already rendered numeral.
    /// `total` is only consulted by [`NumberFormat::PageOfTotal`].
    pub fn apply(self, numeral: &str, total: &str) -> String {
        match self {
            NumberFormat::Number => numeral.to_string(),
            NumberFormat::PageOfTotal => format!("Page {} of {}", numeral, total),
            NumberFormat::PageX => format!("Page {}", numeral),
            NumberFormat::Brackets => format!("[{}]", numeral),
            NumberFormat::Dashes => format!("- {} -", numeral),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberFormat {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_name(s);
        NumberFormat::ALL
            .into_iter()
            .find(|format| normalize_name(format.name()) == key)
            .ok_or_else(|| OrganizeError::InvalidInput(format!("unknown number format '{}'", s)))
    }
}

/// Where a page number is drawn on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }

    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_name(s);
        Position::ALL
            .into_iter()
            .find(|position| normalize_name(position.name()) == key)
            .ok_or_else(|| OrganizeError::InvalidInput(format!("unknown position '{}'", s)))
    }
}

/// Accepts `upper-roman`, `upperRoman`, `UPPER_ROMAN` and friends as the same name.
fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
