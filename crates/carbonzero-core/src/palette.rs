//! The page's color palette.

use crate::Rgba;

/// Page background behind every component.
pub const PAGE_BACKGROUND: Rgba = Rgba::rgb(8, 18, 14);

/// Primary accent (headings, key hints).
pub const ACCENT: Rgba = Rgba::rgb(104, 192, 155);

/// Body text.
pub const TEXT: Rgba = Rgba::rgb(220, 240, 232);

/// Muted text (help line, footer).
pub const MUTED: Rgba = Rgba::rgb(110, 140, 128);

/// Form feedback when validation fails.
pub const FEEDBACK_ERROR: Rgba = Rgba::rgb(0xff, 0xb4, 0xa2);

/// Form feedback after a successful submission.
pub const FEEDBACK_SUCCESS: Rgba = Rgba::rgb(0xbf, 0xea, 0xdf);
