use crate::error::Error;
use crate::image::Image;
use crate::meta::{self, QOI_MAX_RUN};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Decodes a complete QOI image held in memory: header, pixel payload, and
/// end marker.
///
/// Fails if the header or end marker are malformed, if an op runs past the
/// end of the payload, or if the payload doesn't decode to exactly
/// `width * height` pixels.
pub fn decode_image(bytes: &[u8]) -> Result<Image, Error> {
  let (meta, rest) = meta::parse_header(bytes)?;
  log::debug!(
    "decoding {}x{} QOI image, {} channels, colorspace {}",
    meta.width,
    meta.height,
    meta.channels,
    u8::from(meta.colorspace),
  );

  let payload = meta::split_end_marker(rest)?;
  log::trace!("stripped end marker, {} payload bytes", payload.len());

  let pixels = decode(payload, meta.width, meta.height)?;

  Image::new(meta, pixels)
}

/// Decodes a QOI pixel payload, the bytes between the header and the end
/// marker, into pixels.
///
/// `width` and `height` only size the output buffer, checking the decoded
/// pixel count against them is left to the caller (see [`decode_image`]).
pub fn decode(payload: &[u8], width: u32, height: u32) -> Result<Vec<Pixel>, Error> {
  // Every payload byte yields at most one full run.
  let max_pixels = payload.len().saturating_mul(QOI_MAX_RUN as usize);
  let capacity = usize::try_from(width as u64 * height as u64)
    .unwrap_or(usize::MAX)
    .min(max_pixels);

  let mut pixels = Vec::with_capacity(capacity);
  let mut decoder = Decoder::new(payload);

  while decoder.step(&mut pixels)?.is_some() {}

  Ok(pixels)
}

// Steps through a pixel payload one op at a time. Each step consumes exactly
// one op and appends the one or more pixels it describes.
pub(crate) struct Decoder<'a> {
  payload: &'a [u8],
  offset: usize,
  pub(crate) state: State,
}

impl<'a> Decoder<'a> {
  pub(crate) fn new(payload: &'a [u8]) -> Self {
    Self { payload, offset: 0, state: State::new() }
  }

  // Decodes the next op into `pixels`, returning it, or `None` once the
  // payload is exhausted.
  pub(crate) fn step(&mut self, pixels: &mut Vec<Pixel>) -> Result<Option<Op>, Error> {
    if self.offset >= self.payload.len() {
      return Ok(None);
    }

    // The cache is brought up to date with the last finished pixel before the
    // op is interpreted, so an op can never index the pixel it produces.
    self.state.cache_insert(self.state.prev_pixel);

    let (op, len) = Op::read_at(self.payload, self.offset)?;
    let prev = self.state.prev_pixel;

    let (pixel, count) = match op {
      Op::Color(diff_r, diff_g, diff_b) => {
        (Pixel::from_diff(PixelDiff::Color(diff_r, diff_g, diff_b), &prev), 1)
      }
      Op::Index(index) => (self.state.cache[index as usize], 1),
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        (Pixel::from_diff(PixelDiff::Luma(luma_g, luma_rg, luma_bg), &prev), 1)
      }
      Op::Rgb(r, g, b) => (Pixel { r, g, b, a: prev.a }, 1),
      Op::Rgba(r, g, b, a) => (Pixel { r, g, b, a }, 1),
      Op::Run(run_count) => (prev, run_count as usize),
    };

    pixels.extend(std::iter::repeat(pixel).take(count));
    self.state.prev_pixel = pixel;
    self.offset += len;

    Ok(Some(op))
  }
}
