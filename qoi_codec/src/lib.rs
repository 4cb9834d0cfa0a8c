//! This crate implements an encoder and decoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! Both directions work on complete in-memory buffers. [`decode_image`]
//! turns a whole QOI stream into an [`Image`], and [`encode_image`] turns an
//! [`Image`] back into a whole stream. The lower level [`decode`] and
//! [`encode_pixels`] functions work on the bare pixel payload between the
//! header and the end marker.
//!
//! To keep this crate simple, it does not support decoding other image
//! formats. To encode an image, it will first need to be decoded using another
//! method. From there, the decoded pixel data can be handed over as raw
//! channel-interleaved bytes via [`Image::from_raw`].
//!
//! # In-memory encode example
//!
//! ```rust
//! use qoi_codec::{decode_image, encode_image, Colorspace, Image, ImageMeta};
//!
//! // A 2x1 representation of an image's pixel data made up of two opaque
//! // black pixels.
//! let image_source = vec![0, 0, 0, 255, 0, 0, 0, 255];
//!
//! // Metadata describing the image to be encoded.
//! let image_meta = ImageMeta {
//!   width: 2,
//!   height: 1,
//!   channels: 4,
//!   colorspace: Colorspace::Srgb,
//! };
//!
//! let image = Image::from_raw(image_meta, &image_source).expect("Mismatched pixel data");
//! let encoded = encode_image(&image);
//!
//! // Header, a single run op, and the end marker.
//! assert_eq!(encoded.len(), 14 + 1 + 8);
//! assert_eq!(decode_image(&encoded).expect("Failed to decode"), image);
//! ```
//!
//! # Reader/writer example
//!
//! ```rust
//! use std::io::{BufReader, BufWriter};
//! use qoi_codec::{read_image, write_image, Colorspace, Image, ImageMeta, Pixel};
//!
//! let meta = ImageMeta { width: 1, height: 1, channels: 3, colorspace: Colorspace::Linear };
//! let image = Image::new(meta, vec![Pixel::new(10, 20, 30, 255)]).expect("Mismatched pixels");
//!
//! // Any `std::io::Write` destination works, such as a `File`.
//! let mut destination = Vec::new();
//! write_image(BufWriter::new(&mut destination), &image).expect("Failed to write");
//!
//! match read_image(BufReader::new(destination.as_slice())) {
//!   Ok(decoded) => {
//!     assert_eq!(decoded.meta(), &meta);
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```
//!

pub use crate::decode::{decode, decode_image};
pub use crate::encode::{encode, encode_image, encode_pixels};
pub use crate::error::{Error, ErrorKind};
pub use crate::image::{read_image, write_image, Image};
pub use crate::meta::{
  parse_header, serialize_header, split_end_marker, Colorspace, ImageMeta, QOI_BYTES_END,
  QOI_BYTES_MAGIC, QOI_HEADER_LEN, QOI_MAX_RUN,
};
pub use crate::pixel::Pixel;

mod decode;
mod encode;
mod error;
mod image;
mod meta;
mod op;
mod pixel;
mod state;
