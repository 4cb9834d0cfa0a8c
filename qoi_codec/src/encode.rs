use crate::error::Error;
use crate::image::Image;
use crate::meta::{self, ImageMeta, QOI_BYTES_END, QOI_HEADER_LEN, QOI_MAX_RUN};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Encodes an `Image` into a complete QOI stream: header, pixel payload, and
/// end marker.
///
/// An `Image` always holds exactly `width * height` pixels, and every pixel
/// is representable by at least an RGBA op, so this can't fail.
pub fn encode_image(image: &Image) -> Vec<u8> {
  let meta = image.meta();
  log::debug!(
    "encoding {}x{} QOI image, {} channels, colorspace {}",
    meta.width,
    meta.height,
    meta.channels,
    u8::from(meta.colorspace),
  );

  let mut bytes = Vec::with_capacity(QOI_HEADER_LEN + image.pixels().len() + QOI_BYTES_END.len());

  bytes.extend_from_slice(&meta::serialize_header(meta));
  encode_into(image.pixels(), &mut bytes);
  bytes.extend_from_slice(&QOI_BYTES_END);

  log::trace!("encoded {} bytes", bytes.len());

  bytes
}

/// Encodes `pixels` into a complete QOI stream described by `meta`.
///
/// Fails only when `pixels` doesn't hold exactly `width * height` pixels.
pub fn encode(pixels: &[Pixel], meta: &ImageMeta) -> Result<Vec<u8>, Error> {
  let image = Image::new(*meta, pixels.to_vec())?;
  Ok(encode_image(&image))
}

/// Encodes `pixels` into a bare QOI pixel payload, without the header and end
/// marker.
pub fn encode_pixels(pixels: &[Pixel]) -> Vec<u8> {
  let mut payload = Vec::with_capacity(pixels.len());
  encode_into(pixels, &mut payload);
  payload
}

fn encode_into(pixels: &[Pixel], buf: &mut Vec<u8>) {
  let mut encoder = Encoder::new(pixels);

  while let Some(op) = encoder.step() {
    op.write_into(buf);
  }
}

// Walks a pixel sequence choosing one op per step. Each step covers one
// pixel, or up to `QOI_MAX_RUN` pixels for a run.
pub(crate) struct Encoder<'a> {
  pixels: &'a [Pixel],
  position: usize,
  pub(crate) state: State,
}

impl<'a> Encoder<'a> {
  pub(crate) fn new(pixels: &'a [Pixel]) -> Self {
    Self { pixels, position: 0, state: State::new() }
  }

  // Chooses the op for the pixel(s) at the current position, or returns
  // `None` once every pixel has been covered.
  pub(crate) fn step(&mut self) -> Option<Op> {
    let pixel = *self.pixels.get(self.position)?;
    let prev = self.state.prev_pixel;

    let op = if pixel == prev {
      let run_count = self.pixels[self.position..]
        .iter()
        .take(QOI_MAX_RUN as usize)
        .take_while(|&&next| next == pixel)
        .count();

      self.position += run_count;
      Op::Run(run_count as u8)
    } else {
      self.position += 1;
      self.choose_op(pixel, prev)
    };

    self.state.prev_pixel = pixel;
    self.state.cache_insert(pixel);

    Some(op)
  }

  // Picks the op for a pixel that differs from its predecessor, in order of
  // preference: index, rgba, color diff, luma diff, rgb.
  fn choose_op(&self, pixel: Pixel, prev: Pixel) -> Op {
    if let Some(index) = self.state.cache_lookup(pixel) {
      return Op::Index(index);
    }

    if pixel.a != prev.a {
      return Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a);
    }

    match pixel.diff(&prev) {
      Some(PixelDiff::Color(diff_r, diff_g, diff_b)) => Op::Color(diff_r, diff_g, diff_b),
      Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg)) => Op::Luma(luma_g, luma_rg, luma_bg),
      None => Op::Rgb(pixel.r, pixel.g, pixel.b),
    }
  }
}
