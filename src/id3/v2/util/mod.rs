//! Utilities for working with ID3v2 tags

pub(crate) mod text_utils;
pub mod unsynch;
