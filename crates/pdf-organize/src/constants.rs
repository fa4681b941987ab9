//! Shared constants for page stamping

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Page Numbers
// =============================================================================

/// Default font size for page numbers (points)
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Default distance of the page number from the page edge (mm)
pub const DEFAULT_MARGIN_MM: f32 = 10.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Resource name of the stamped font
pub const PAGE_NUMBER_FONT_NAME: &str = "FPgNum";

// =============================================================================
// Page Lists
// =============================================================================

/// Largest page number accepted in a user-entered page list
pub const MAX_PAGE_NUMBER: usize = 100_000;

// =============================================================================
// Page Tree
// =============================================================================

/// Page attributes a page may inherit from its ancestors in the page tree
pub const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];
