/*!
 * Character-count partitioning of long text.
 *
 * Text is split left to right into slices of at most `size` characters
 * (Unicode scalar values). Slices never overlap, never split a code point and
 * concatenate back to the input. Splits ignore word and sentence boundaries.
 */

use std::iter::FusedIterator;

use crate::errors::TranslationError;

/// Lazy iterator over the chunks of a string
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    remaining: &'a str,
    size: usize,
}

/// Partition `text` into chunks of at most `size` characters.
///
/// A `size` of zero is rejected. The returned iterator is cheap to clone, so
/// the partition can be walked again without re-validating.
pub fn partition(text: &str, size: usize) -> Result<Chunks<'_>, TranslationError> {
    if size == 0 {
        return Err(TranslationError::InvalidChunkSize(size));
    }
    Ok(Chunks { remaining: text, size })
}

/// Number of chunks `partition(text, size)` yields: ceil(chars / size)
pub fn chunk_count(text: &str, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    text.chars().count().div_ceil(size)
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let end = self.remaining
            .char_indices()
            .nth(self.size)
            .map(|(index, _)| index)
            .unwrap_or(self.remaining.len());

        let (chunk, rest) = self.remaining.split_at(end);
        self.remaining = rest;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining.is_empty() {
            return (0, Some(0));
        }
        // Each char is 1..=4 bytes
        let min = self.remaining.len().div_ceil(4).div_ceil(self.size);
        let max = self.remaining.len().div_ceil(self.size);
        (min, Some(max))
    }
}

impl FusedIterator for Chunks<'_> {}
