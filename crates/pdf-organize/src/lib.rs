mod constants;
pub mod document;
mod editor;
mod numbering;
mod options;
mod page_range;
mod types;

pub use document::{
    apply_organization, load_pdf, number_pages, organize, page_count, save_pdf,
    stamp_page_numbers,
};
pub use editor::{PageEntry, PageSequenceEditor, SessionState};
pub use numbering::{MAX_ROMAN, PageLabel, PageNumberingPlan, render_numeral};
pub use options::*;
pub use page_range::{format_page_ranges, format_page_sequence, parse_page_list};
pub use types::*;
