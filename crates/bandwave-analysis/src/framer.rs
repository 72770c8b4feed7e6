//! Fixed-size, non-overlapping analysis chunks.
//!
//! A [`Framer`] borrows the sample sequence and hands out `&[f32]` slices of
//! exactly `sample_rate / analysis_fps` samples. The trailing partial chunk
//! is dropped, never zero padded.
//!
//! # Example
//!
//! ```rust
//! use bandwave_analysis::Framer;
//!
//! let samples = vec![0.0; 14700];
//! let framer = Framer::new(&samples, 44100, 30).unwrap();
//! assert_eq!(framer.chunk_size(), 1470);
//! assert_eq!(framer.len(), 10);
//! ```

use crate::{Error, Result};
use std::iter::FusedIterator;

/// Slices a mono sample sequence into analysis chunks.
///
/// Iteration is lazy and restartable: every call to [`iter`](Self::iter)
/// starts from the first chunk again.
#[derive(Debug, Clone, Copy)]
pub struct Framer<'a> {
    samples: &'a [f32],
    chunk_size: usize,
}

impl<'a> Framer<'a> {
    /// Create a framer for `samples` at `sample_rate` Hz, `analysis_fps` chunks per second.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if either rate is zero or the
    /// floored chunk size is zero.
    pub fn new(samples: &'a [f32], sample_rate: u32, analysis_fps: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::config("sample_rate must be positive"));
        }
        if analysis_fps == 0 {
            return Err(Error::config("analysis_fps must be positive"));
        }
        Self::with_chunk_size(samples, (sample_rate / analysis_fps) as usize)
    }

    /// Create a framer with an explicit chunk size.
    pub fn with_chunk_size(samples: &'a [f32], chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk size is zero"));
        }
        Ok(Self {
            samples,
            chunk_size,
        })
    }

    /// Samples per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of full chunks (`floor(len(samples) / chunk_size)`).
    pub fn len(&self) -> usize {
        self.samples.len() / self.chunk_size
    }

    /// True when the sequence is shorter than one chunk.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples left over after the last full chunk.
    pub fn remainder(&self) -> usize {
        self.samples.len() % self.chunk_size
    }

    /// Chunk `index`, or `None` past the last full chunk.
    pub fn chunk(&self, index: usize) -> Option<&'a [f32]> {
        let start = index.checked_mul(self.chunk_size)?;
        let end = start.checked_add(self.chunk_size)?;
        self.samples.get(start..end)
    }

    /// Iterate over the full chunks in order.
    pub fn iter(&self) -> Chunks<'a> {
        Chunks {
            inner: self.samples.chunks_exact(self.chunk_size),
        }
    }
}

impl<'a> IntoIterator for &Framer<'a> {
    type Item = &'a [f32];
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the chunks of a [`Framer`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    inner: std::slice::ChunksExact<'a, f32>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_chunking() {
        let samples = vec![0.0; 14700];
        let framer = Framer::new(&samples, 44100, 30).unwrap();
        assert_eq!(framer.chunk_size(), 1470);
        assert_eq!(framer.len(), 10);
        assert_eq!(framer.remainder(), 0);
        assert_eq!(framer.iter().count(), 10);
        assert!(framer.iter().all(|c| c.len() == 1470));
    }

    #[test]
    fn test_partial_chunk_dropped() {
        let samples: Vec<f32> = (0..25).map(|i| i as f32).collect();
        let framer = Framer::with_chunk_size(&samples, 10).unwrap();
        assert_eq!(framer.len(), 2);
        assert_eq!(framer.remainder(), 5);

        let chunks: Vec<&[f32]> = framer.iter().collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1][0], 10.0);
        assert!(framer.chunk(2).is_none());
    }

    #[test]
    fn test_restartable() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let framer = Framer::with_chunk_size(&samples, 7).unwrap();
        let first: Vec<&[f32]> = framer.iter().collect();
        let second: Vec<&[f32]> = (&framer).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(framer.iter().len(), 14);
    }

    #[test]
    fn test_short_input_is_empty() {
        let samples = vec![0.5; 1469];
        let framer = Framer::new(&samples, 44100, 30).unwrap();
        assert!(framer.is_empty());
        assert_eq!(framer.iter().next(), None);
    }

    #[test]
    fn test_invalid_configuration() {
        let samples = vec![0.0; 10];
        assert!(matches!(
            Framer::new(&samples, 44100, 0),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Framer::new(&samples, 0, 30),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Framer::new(&samples, 20, 30),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
