use proptest::prelude::*;
use qoi_codec::{
  decode, decode_image, encode, encode_image, encode_pixels, Colorspace, Image, ImageMeta, Pixel,
};

const PALETTE: [Pixel; 6] = [
  Pixel::new(0, 0, 0, 0),
  Pixel::new(0, 0, 0, 255),
  Pixel::new(255, 255, 255, 255),
  Pixel::new(200, 30, 30, 255),
  Pixel::new(200, 30, 30, 128),
  Pixel::new(1, 1, 1, 1),
];

// Builds pixel sequences that exercise every op: fresh random pixels, repeats
// of the previous pixel, small and medium color steps, and revisits of a
// small palette.
fn arb_pixels() -> impl Strategy<Value = Vec<Pixel>> {
  prop::collection::vec((0..5u8, any::<[u8; 4]>(), -40i8..40, 0..6usize), 0..400).prop_map(
    |steps| {
      let mut prev = Pixel::START;
      let mut pixels = Vec::with_capacity(steps.len());

      for (kind, random, delta, palette_index) in steps {
        let pixel = match kind {
          0 => Pixel::from(random),
          1 => prev,
          2 => Pixel::new(
            prev.r.wrapping_add((delta % 2) as u8),
            prev.g.wrapping_add((delta % 3) as u8),
            prev.b.wrapping_add((delta % 2) as u8),
            prev.a,
          ),
          3 => Pixel::new(
            prev.r.wrapping_add((delta / 4) as u8),
            prev.g.wrapping_add(delta as u8),
            prev.b.wrapping_add((delta / 5) as u8),
            prev.a,
          ),
          _ => PALETTE[palette_index],
        };

        pixels.push(pixel);
        prev = pixel;
      }

      pixels
    },
  )
}

// Whole RGB pixels worth of random bytes.
fn arb_rgb_raw() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..64).prop_map(|mut raw| {
    raw.truncate(raw.len() / 3 * 3);
    raw
  })
}

fn row_meta(len: usize) -> ImageMeta {
  ImageMeta { width: len as u32, height: 1, channels: 4, colorspace: Colorspace::Srgb }
}

// Walks an encoded payload op by op, independently of the decoder, returning
// each op's tag byte and the number of pixels it covers.
fn walk_ops(payload: &[u8]) -> Vec<(u8, usize)> {
  let mut ops = Vec::new();
  let mut offset = 0;

  while offset < payload.len() {
    let tag = payload[offset];
    let (len, count) = match tag {
      0xff => (5, 1),
      0xfe => (4, 1),
      0x80..=0xbf => (2, 1),
      0xc0..=0xfd => (1, (tag & 0x3f) as usize + 1),
      _ => (1, 1),
    };

    ops.push((tag, count));
    offset += len;
  }

  assert_eq!(offset, payload.len(), "last op overran the payload");
  ops
}

proptest! {
  #[test]
  fn test_roundtrip(pixels in arb_pixels()) {
    let meta = row_meta(pixels.len());
    let bytes = encode(&pixels, &meta).expect("Failed to encode");
    let image = decode_image(&bytes).expect("Failed to decode");

    prop_assert_eq!(image.meta(), &meta);
    prop_assert_eq!(image.pixels(), pixels.as_slice());
  }

  #[test]
  fn test_payload_roundtrip(pixels in arb_pixels()) {
    let payload = encode_pixels(&pixels);
    let decoded = decode(&payload, pixels.len() as u32, 1).expect("Failed to decode");

    prop_assert_eq!(decoded, pixels);
  }

  #[test]
  fn test_encoding_is_deterministic(pixels in arb_pixels()) {
    prop_assert_eq!(encode_pixels(&pixels), encode_pixels(&pixels));
  }

  #[test]
  fn test_ops_cover_every_pixel_once(pixels in arb_pixels()) {
    let ops = walk_ops(&encode_pixels(&pixels));
    let covered: usize = ops.iter().map(|(_, count)| count).sum();

    prop_assert_eq!(covered, pixels.len());
  }

  #[test]
  fn test_runs_never_span_changed_pixels(pixels in arb_pixels()) {
    let mut position = 0;

    for (tag, count) in walk_ops(&encode_pixels(&pixels)) {
      if (0xc0..=0xfd).contains(&tag) {
        let prev = if position == 0 { Pixel::START } else { pixels[position - 1] };
        prop_assert!(pixels[position..position + count].iter().all(|&pixel| pixel == prev));
      }

      position += count;
    }
  }

  #[test]
  fn test_alpha_change_forces_rgba(pixels in arb_pixels()) {
    let mut position = 0;

    for (tag, count) in walk_ops(&encode_pixels(&pixels)) {
      let prev = if position == 0 { Pixel::START } else { pixels[position - 1] };

      if pixels[position].a != prev.a {
        // Only an rgba op or a cache hit can carry a new alpha value.
        prop_assert!(tag == 0xff || tag < 0x40, "tag {:#04x} at pixel {}", tag, position);
      }

      position += count;
    }
  }

  #[test]
  fn test_rgb_raw_roundtrip(raw in arb_rgb_raw()) {
    let meta = ImageMeta {
      width: (raw.len() / 3) as u32,
      height: 1,
      channels: 3,
      colorspace: Colorspace::Linear,
    };
    let image = Image::from_raw(meta, &raw).expect("Failed to read raw pixels");
    let decoded = decode_image(&encode_image(&image)).expect("Failed to decode");

    prop_assert!(decoded.pixels().iter().all(|pixel| pixel.a == 255));
    prop_assert_eq!(decoded.to_raw().expect("Failed to write raw pixels"), raw);
  }
}

#[test]
fn test_gradient_image_roundtrip() {
  let (width, height) = (64u32, 48u32);
  let pixels: Vec<Pixel> = (0..height)
    .flat_map(|y| {
      (0..width).map(move |x| Pixel::new(x as u8, (y * 2) as u8, (x / 2) as u8, 255))
    })
    .collect();

  let meta = ImageMeta { width, height, channels: 4, colorspace: Colorspace::Srgb };
  let image = Image::new(meta, pixels).expect("Failed to build image");
  let bytes = encode_image(&image);

  // A smooth gradient compresses well below raw size.
  assert!(bytes.len() < (width * height * 4) as usize / 2);
  assert_eq!(decode_image(&bytes).expect("Failed to decode"), image);
}
