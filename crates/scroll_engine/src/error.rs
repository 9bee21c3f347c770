//! Build-time error types
//!
//! Every error here is raised once while a background or marquee is being
//! created. Rendering never fails; see the individual `render` methods.

/// Result type for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while building facets or text layouts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Triangle buffer length is not a multiple of 9 (3 vertices x 3 components)
    #[error("Triangle buffer holds {len} floats, expected a multiple of 9")]
    InvalidGeometryInput {
        /// Length of the rejected buffer
        len: usize,
    },

    /// Triangle has a zero-length edge or no usable orientation basis
    #[error("Triangle {index} is degenerate")]
    DegenerateTriangle {
        /// Index of the triangle in the source buffer
        index: usize,
    },

    /// Glyph chord does not fit on a circle of the configured radius
    #[error("Glyph '{ch}' is too wide for radius {radius} (chord argument {chord})")]
    GlyphTooWide {
        /// Offending character
        ch: char,
        /// Placement radius
        radius: f32,
        /// `width * scale / (2 * radius)`, outside `[-1, 1]`
        chord: f32,
    },

    /// Printable glyph measured with zero width
    #[error("Glyph '{ch}' has zero width")]
    DegenerateGlyph {
        /// Offending character
        ch: char,
    },

    /// Sum of angular widths is zero (empty or all-space text)
    #[error("Text has an empty angular period")]
    EmptyAngularPeriod,

    /// Font has no metric for the requested character
    #[error("Character '{0}' has no glyph metric")]
    MissingGlyphMetric(char),

    /// Configuration value out of its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
