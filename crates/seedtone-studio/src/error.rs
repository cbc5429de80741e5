// SPDX-License-Identifier: MIT
use seedtone_color::ParseHexError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudioError>;

/// Rejected studio operations. The live state is unchanged when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    InvalidColor(#[from] ParseHexError),

    #[error("no history or favorite entry with id {id:?}")]
    UnknownEntry { id: String },

    #[error("{name:?} is not a {role} font")]
    UnknownFont { role: &'static str, name: String },
}

impl StudioError {
    #[must_use]
    pub fn unknown_entry(id: impl Into<String>) -> Self {
        Self::UnknownEntry { id: id.into() }
    }
}
