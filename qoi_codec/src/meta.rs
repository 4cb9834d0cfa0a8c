use crate::error::Error;

pub const QOI_BYTES_END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
pub const QOI_BYTES_MAGIC: &[u8; 4] = b"qoif";
pub const QOI_HEADER_LEN: usize = 14;
pub const QOI_MAX_RUN: u8 = 62;

/// Metadata describing an image, as carried by the 14 byte QOI header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageMeta {
  /// The number of color channels of the source image, 3 for RGB and 4 for
  /// RGBA. Only consulted when converting raw pixel buffers, the codec
  /// itself always stores all four channels of every pixel.
  pub channels: u8,
  /// The image's colorspace, see [Colorspace].
  pub colorspace: Colorspace,
  /// The image's height.
  pub height: u32,
  /// The image's width.
  pub width: u32,
}

impl ImageMeta {
  /// Returns the total number of pixels that make up the image.
  pub fn num_pixels(&self) -> u64 {
    self.width as u64 * self.height as u64
  }
}

/// The colorspace byte of the header. It is opaque to the codec and passed
/// through unchanged, the named variants only label the two conventional
/// values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Colorspace {
  /// sRGB color channels with linear alpha, stored as `0`.
  Srgb,
  /// All channels linear, stored as `1`.
  Linear,
  /// Any other byte.
  Other(u8),
}

impl From<u8> for Colorspace {
  fn from(byte: u8) -> Self {
    match byte {
      0 => Colorspace::Srgb,
      1 => Colorspace::Linear,
      _ => Colorspace::Other(byte),
    }
  }
}

impl From<Colorspace> for u8 {
  fn from(colorspace: Colorspace) -> Self {
    match colorspace {
      Colorspace::Srgb => 0,
      Colorspace::Linear => 1,
      Colorspace::Other(byte) => byte,
    }
  }
}

/// Parses the QOI header at the start of `bytes`, returning the image's
/// `ImageMeta` and the bytes that follow the header.
pub fn parse_header(bytes: &[u8]) -> Result<(ImageMeta, &[u8]), Error> {
  if bytes.len() < QOI_HEADER_LEN {
    return Err(Error::HeaderTooShort(bytes.len()));
  }

  let (header, rest) = bytes.split_at(QOI_HEADER_LEN);

  if &header[..4] != QOI_BYTES_MAGIC {
    return Err(Error::InvalidMagic([header[0], header[1], header[2], header[3]]));
  }

  let meta = ImageMeta {
    width: u32::from_be_bytes([header[4], header[5], header[6], header[7]]),
    height: u32::from_be_bytes([header[8], header[9], header[10], header[11]]),
    channels: header[12],
    colorspace: Colorspace::from(header[13]),
  };

  Ok((meta, rest))
}

/// Serializes `meta` into a 14 byte QOI header.
pub fn serialize_header(meta: &ImageMeta) -> [u8; QOI_HEADER_LEN] {
  let mut header = [0; QOI_HEADER_LEN];

  header[..4].copy_from_slice(QOI_BYTES_MAGIC);
  header[4..8].copy_from_slice(&meta.width.to_be_bytes());
  header[8..12].copy_from_slice(&meta.height.to_be_bytes());
  header[12] = meta.channels;
  header[13] = meta.colorspace.into();

  header
}

/// Splits the trailing end marker off of the bytes following the header,
/// returning the pixel payload.
pub fn split_end_marker(bytes: &[u8]) -> Result<&[u8], Error> {
  match bytes.strip_suffix(&QOI_BYTES_END) {
    Some(payload) => Ok(payload),
    None => Err(Error::InvalidEndMarker),
  }
}
