// An enumeration of the possible pixel "diffs", with bias applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelDiff {
  // A `QOI_OP_DIFF` diff, each channel biased by +2.
  Color(u8, u8, u8),
  // A `QOI_OP_LUMA` diff. Green is biased by +32, red-green and blue-green
  // by +8.
  Luma(u8, u8, u8),
}

/// A single RGBA pixel. Pixels are plain values, two pixels are the same
/// pixel exactly when all four channels are equal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Pixel {
  /// Red channel value.
  pub r: u8,
  /// Green channel value.
  pub g: u8,
  /// Blue channel value.
  pub b: u8,
  /// Alpha channel value.
  pub a: u8,
}

impl Pixel {
  /// The "previous pixel" every encode and decode starts from.
  pub const START: Pixel = Pixel { r: 0, g: 0, b: 0, a: 255 };

  /// Creates a pixel from its four channel values.
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Returns the slot of the 64 entry pixel cache this pixel is stored in,
  /// `(r * 3 + g * 5 + b * 7 + a * 11) % 64`.
  pub fn hash_index(&self) -> usize {
    let r = self.r as usize;
    let g = self.g as usize;
    let b = self.b as usize;
    let a = self.a as usize;

    (r * 3 + g * 5 + b * 7 + a * 11) % 64
  }

  // Attempts to express `self` as a diff against the `prev` pixel. Returns
  // `None` when the alpha channels differ or a channel delta is out of range
  // for both diff ops. Deltas wrap, so 255 -> 0 is a delta of +1.
  pub(crate) fn diff(&self, prev: &Pixel) -> Option<PixelDiff> {
    if self.a != prev.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(prev.r);
    let diff_g = self.g.wrapping_sub(prev.g);
    let diff_b = self.b.wrapping_sub(prev.b);

    let color_r = diff_r.wrapping_add(2);
    let color_g = diff_g.wrapping_add(2);
    let color_b = diff_b.wrapping_add(2);

    if color_r < 4 && color_g < 4 && color_b < 4 {
      return Some(PixelDiff::Color(color_r, color_g, color_b));
    }

    let luma_g = diff_g.wrapping_add(32);

    if luma_g >= 64 {
      return None;
    }

    let luma_rg = diff_r.wrapping_sub(diff_g).wrapping_add(8);
    let luma_bg = diff_b.wrapping_sub(diff_g).wrapping_add(8);

    if luma_rg < 16 && luma_bg < 16 {
      return Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg));
    }

    None
  }

  // Recreates a pixel from a biased `diff` against the `prev` pixel. Alpha is
  // always carried over.
  pub(crate) fn from_diff(diff: PixelDiff, prev: &Pixel) -> Self {
    match diff {
      PixelDiff::Color(color_r, color_g, color_b) => Self {
        r: prev.r.wrapping_add(color_r).wrapping_sub(2),
        g: prev.g.wrapping_add(color_g).wrapping_sub(2),
        b: prev.b.wrapping_add(color_b).wrapping_sub(2),
        a: prev.a,
      },
      PixelDiff::Luma(luma_g, luma_rg, luma_bg) => {
        let diff_g = luma_g.wrapping_sub(32);
        let diff_r = luma_rg.wrapping_sub(8).wrapping_add(diff_g);
        let diff_b = luma_bg.wrapping_sub(8).wrapping_add(diff_g);

        Self {
          r: prev.r.wrapping_add(diff_r),
          g: prev.g.wrapping_add(diff_g),
          b: prev.b.wrapping_add(diff_b),
          a: prev.a,
        }
      }
    }
  }
}

impl From<[u8; 4]> for Pixel {
  fn from([r, g, b, a]: [u8; 4]) -> Self {
    Self { r, g, b, a }
  }
}

impl From<Pixel> for [u8; 4] {
  fn from(pixel: Pixel) -> Self {
    [pixel.r, pixel.g, pixel.b, pixel.a]
  }
}
