//! Character constants for page decorations.

/// Particle glyphs from smallest to largest.
pub const PARTICLE_CHARS: &[char] = &['·', '•', '●'];
