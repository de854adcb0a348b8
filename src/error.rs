use thiserror::Error;

/// Everything that can go wrong while applying a single filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The requested name is not registered with the engine. The built-in
    /// catalog can never produce this, but callers resolving filters by
    /// name get a real error instead of a silent no-op.
    #[error("no filter registered under the name \"{0}\"")]
    UnknownFilter(String),

    /// The source bitmap has a zero-pixel extent and cannot be processed.
    #[error("source image has a degenerate {width}x{height} extent")]
    EmptySource { width: u32, height: u32 },

    /// The filter ran but produced an empty output image.
    #[error("filter produced an empty output image")]
    EmptyOutput,
}
