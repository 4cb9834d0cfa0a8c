use std::io;

use thiserror::Error;

/// An enumeration of all error values this crate may produce.
#[derive(Debug, Error)]
pub enum Error {
  /// The stream is too short to contain a complete header.
  #[error("QOI header requires 14 bytes, but only {0} are available")]
  HeaderTooShort(usize),
  /// The first four bytes of the stream are not `qoif`.
  #[error("invalid magic bytes {0:02x?}, expected \"qoif\"")]
  InvalidMagic([u8; 4]),
  /// The stream does not end with the 8 byte end marker.
  #[error("missing or malformed end of stream marker")]
  InvalidEndMarker,
  /// The number of pixels decoded from, or handed to be encoded into, a
  /// stream does not equal the image's width * height.
  #[error("expected {expected} pixels from image dimensions, found {actual}")]
  PixelCountMismatch { expected: u64, actual: u64 },
  /// An op at `offset` in the pixel payload needs more bytes than remain.
  #[error(
    "truncated op at payload offset {offset}: needs {needed} bytes, {available} available"
  )]
  TruncatedStream { offset: usize, needed: usize, available: usize },
  /// A raw pixel buffer was described with a channel count other than 3 or 4.
  #[error("unsupported channel count {0}, expected 3 for RGB or 4 for RGBA")]
  InvalidChannels(u8),
  /// A raw pixel buffer's length does not match width * height * channels.
  #[error("raw pixel buffer holds {actual} bytes, expected {expected}")]
  RawBufferSize { expected: u64, actual: u64 },
  /// Any `std::io::Error` raised while reading a stream from an image source
  /// or writing one to an image destination. The codec itself never does IO.
  #[error(transparent)]
  Io(#[from] io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
  /// Malformed framing, metadata, or pixel count.
  Format,
  /// An op ran past the end of the pixel payload.
  TruncatedStream,
  /// The image source or destination failed.
  Io,
}

impl Error {
  /// Returns which class of failure this error belongs to.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::TruncatedStream { .. } => ErrorKind::TruncatedStream,
      Error::Io(_) => ErrorKind::Io,
      _ => ErrorKind::Format,
    }
  }
}
