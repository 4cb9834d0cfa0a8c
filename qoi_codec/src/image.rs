use std::io;

use crate::decode::decode_image;
use crate::encode::encode_image;
use crate::error::Error;
use crate::meta::ImageMeta;
use crate::pixel::Pixel;

/// An image's `ImageMeta` data along with exactly `width * height` pixels in
/// row-major order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
  meta: ImageMeta,
  pixels: Vec<Pixel>,
}

impl Image {
  /// Pairs `pixels` with their metadata. Fails if the number of pixels
  /// doesn't match the image's dimensions.
  ///
  /// Alpha is kept as given even when `meta.channels` is 3.
  pub fn new(meta: ImageMeta, pixels: Vec<Pixel>) -> Result<Self, Error> {
    if pixels.len() as u64 != meta.num_pixels() {
      return Err(Error::PixelCountMismatch {
        expected: meta.num_pixels(),
        actual: pixels.len() as u64,
      });
    }

    Ok(Self { meta, pixels })
  }

  /// Builds an image from channel-interleaved pixel data, `RGBRGB..` when
  /// `meta.channels` is 3 and `RGBARGBA..` when it's 4. Pixels of a 3
  /// channel image are fully opaque.
  pub fn from_raw(meta: ImageMeta, raw: &[u8]) -> Result<Self, Error> {
    let channels = raw_channels(&meta)?;
    let expected = meta.num_pixels().saturating_mul(channels as u64);

    if raw.len() as u64 != expected {
      return Err(Error::RawBufferSize { expected, actual: raw.len() as u64 });
    }

    let pixels = raw
      .chunks_exact(channels)
      .map(|chunk| Pixel {
        r: chunk[0],
        g: chunk[1],
        b: chunk[2],
        a: chunk.get(3).copied().unwrap_or(255),
      })
      .collect();

    Self::new(meta, pixels)
  }

  /// Flattens the image into channel-interleaved pixel data, dropping alpha
  /// when `meta.channels` is 3.
  pub fn to_raw(&self) -> Result<Vec<u8>, Error> {
    let channels = raw_channels(&self.meta)?;
    let mut raw = Vec::with_capacity(self.pixels.len() * channels);

    for pixel in &self.pixels {
      let rgba: [u8; 4] = (*pixel).into();
      raw.extend_from_slice(&rgba[..channels]);
    }

    Ok(raw)
  }

  /// The image's header metadata.
  pub fn meta(&self) -> &ImageMeta {
    &self.meta
  }

  /// The image's pixels in row-major order.
  pub fn pixels(&self) -> &[Pixel] {
    &self.pixels
  }

  /// Consumes the image, returning its pixels.
  pub fn into_pixels(self) -> Vec<Pixel> {
    self.pixels
  }
}

// Raw buffers only come in RGB and RGBA flavors.
fn raw_channels(meta: &ImageMeta) -> Result<usize, Error> {
  match meta.channels {
    3 | 4 => Ok(meta.channels as usize),
    channels => Err(Error::InvalidChannels(channels)),
  }
}

/// Reads a complete QOI stream from `reader` and decodes it.
///
/// The whole stream is buffered in memory before decoding starts.
pub fn read_image<R: io::Read>(mut reader: R) -> Result<Image, Error> {
  let mut bytes = Vec::new();
  reader.read_to_end(&mut bytes)?;
  log::trace!("read {} byte QOI stream", bytes.len());

  decode_image(&bytes)
}

/// Encodes `image` and writes the complete QOI stream to `writer`.
pub fn write_image<W: io::Write>(mut writer: W, image: &Image) -> Result<(), Error> {
  let bytes = encode_image(image);

  writer.write_all(&bytes)?;
  writer.flush()?;

  Ok(())
}
