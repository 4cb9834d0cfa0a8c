use qoi_codec::{encode, encode_image, encode_pixels, Colorspace, Error, Image, ImageMeta, Pixel};

fn meta(width: u32, height: u32) -> ImageMeta {
  ImageMeta { width, height, channels: 4, colorspace: Colorspace::Srgb }
}

#[test]
fn test_encoding_blank_image() {
  let image = Image::new(meta(0, 0), Vec::new()).expect("Failed to build image");

  assert_eq!(encode_image(&image).len(), 22); // QOI_HEADER_LEN + QOI_BYTES_END.len()
}

#[test]
fn test_encoding_image_with_bad_dimensions() {
  let result = encode(&[Pixel::new(101, 102, 103, 255)], &meta(999, 1));

  assert!(matches!(result, Err(Error::PixelCountMismatch { expected: 999, actual: 1 })));
}

#[test]
fn test_encoded_stream_framing() {
  let bytes = encode(&[Pixel::new(1, 2, 3, 4)], &meta(1, 1)).expect("Failed to encode");

  assert_eq!(&bytes[..14], &[b'q', b'o', b'i', b'f', 0, 0, 0, 1, 0, 0, 0, 1, 4, 0]);
  assert_eq!(&bytes[14..bytes.len() - 8], &[0xff, 1, 2, 3, 4]);
  assert_eq!(&bytes[bytes.len() - 8..], &[0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn test_colorspace_byte_passes_through() {
  let meta = ImageMeta { width: 1, height: 1, channels: 3, colorspace: Colorspace::Other(7) };
  let bytes = encode(&[Pixel::START], &meta).expect("Failed to encode");

  assert_eq!(bytes[13], 7);
}

#[test]
fn test_sixty_three_repeats_split_into_two_runs() {
  let pixels = vec![Pixel::new(200, 30, 90, 255); 64];

  // Op::Rgb(200, 30, 90), Op::Run(62), Op::Run(1)
  assert_eq!(encode_pixels(&pixels), vec![0xfe, 200, 30, 90, 0xfd, 0xc0]);
}

#[test]
fn test_run_split_after_luma_op() {
  let pixels = vec![Pixel::new(9, 9, 9, 255); 64];

  // Op::Luma(41, 8, 8), Op::Run(62), Op::Run(1)
  assert_eq!(encode_pixels(&pixels), vec![0x80 | 41, 0x88, 0xfd, 0xc0]);
}

#[test]
fn test_encoding_is_deterministic() {
  let pixels: Vec<Pixel> = (0..4096u32)
    .map(|i| Pixel::new((i % 251) as u8, (i / 16) as u8, (i * 7) as u8, 255 - (i % 5) as u8))
    .collect();

  assert_eq!(encode_pixels(&pixels), encode_pixels(&pixels));
}
