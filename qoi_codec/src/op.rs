use crate::error::Error;
use crate::meta::QOI_MAX_RUN;

// An enumeration of each possible QOI encoding "chunk", or Op.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `QOI_OP_DIFF`, contains the red, green, and blue color difference from the
  // previous pixel with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Color(u8, u8, u8),

  // `QOI_OP_INDEX`, index into the state's pixel cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `QOI_OP_LUMA`, contains the red, green, and blue luma difference from the
  // previous pixel. The green difference has a bias of +32, the red-green, and
  // blue-green difference has a bias of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(u8, u8, u8),

  // `QOI_OP_RGB`, contains the red, green, and blue values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `QOI_OP_RGBA`, contains the red, green, blue, and alpha values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),

  // `QOI_OP_RUN`, contains the length of the run, 1 through 62. Stored with a
  // bias of -1 so the tag bytes 0xfe and 0xff stay free for Rgb and Rgba.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  Run(u8),
}

impl Op {
  const MASK_COLOR: u8 = 0x03;
  const MASK_INDEX: u8 = 0x3f;
  const MASK_LUMA_1: u8 = 0x3f;
  const MASK_LUMA_2: u8 = 0x0f;
  const MASK_RUN: u8 = 0x3f;
  const MASK_TAG: u8 = 0xc0;

  const TAG_COLOR: u8 = 0x40;
  const TAG_INDEX: u8 = 0x00;
  const TAG_LUMA: u8 = 0x80;
  const TAG_RGB: u8 = 0xfe;
  const TAG_RGBA: u8 = 0xff;
  const TAG_RUN: u8 = 0xc0;

  // Number of bytes, tag byte included, taken up by the op starting with
  // `tag`. The full byte tags must be checked before the 2-bit ones.
  pub fn len_for_tag(tag: u8) -> usize {
    match tag {
      Op::TAG_RGBA => 5,
      Op::TAG_RGB => 4,
      _ if tag & Op::MASK_TAG == Op::TAG_LUMA => 2,
      _ => 1,
    }
  }

  // Encodes the `Op` and appends its bytes to `buf`.
  pub fn write_into(self, buf: &mut Vec<u8>) {
    match self {
      Op::Color(diff_r, diff_g, diff_b) => {
        buf.push(Op::TAG_COLOR | (diff_r << 4) | (diff_g << 2) | diff_b);
      }
      Op::Index(index) => {
        buf.push(Op::TAG_INDEX | index);
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        buf.extend_from_slice(&[Op::TAG_LUMA | luma_g, (luma_rg << 4) | luma_bg]);
      }
      Op::Rgb(r, g, b) => {
        buf.extend_from_slice(&[Op::TAG_RGB, r, g, b]);
      }
      Op::Rgba(r, g, b, a) => {
        buf.extend_from_slice(&[Op::TAG_RGBA, r, g, b, a]);
      }
      Op::Run(run_count) => {
        debug_assert!((1..=QOI_MAX_RUN).contains(&run_count));
        buf.push(Op::TAG_RUN | (run_count - 1));
      }
    }
  }

  // Decodes the `Op` starting at `offset` in `payload`, returning it along
  // with the number of bytes it occupies. This is the only place the decoder
  // checks for running past the end of the payload.
  pub fn read_at(payload: &[u8], offset: usize) -> Result<(Self, usize), Error> {
    let available = payload.len().saturating_sub(offset);
    let tag = match payload.get(offset) {
      Some(&tag) => tag,
      None => return Err(Error::TruncatedStream { offset, needed: 1, available }),
    };
    let len = Op::len_for_tag(tag);

    if available < len {
      return Err(Error::TruncatedStream { offset, needed: len, available });
    }

    let bytes = &payload[offset..offset + len];

    let op = match tag {
      Op::TAG_RGBA => Op::Rgba(bytes[1], bytes[2], bytes[3], bytes[4]),
      Op::TAG_RGB => Op::Rgb(bytes[1], bytes[2], bytes[3]),
      _ => match tag & Op::MASK_TAG {
        Op::TAG_INDEX => Op::Index(tag & Op::MASK_INDEX),
        Op::TAG_COLOR => Op::Color(
          tag >> 4 & Op::MASK_COLOR,
          tag >> 2 & Op::MASK_COLOR,
          tag & Op::MASK_COLOR,
        ),
        Op::TAG_LUMA => Op::Luma(
          tag & Op::MASK_LUMA_1,
          bytes[1] >> 4 & Op::MASK_LUMA_2,
          bytes[1] & Op::MASK_LUMA_2,
        ),
        _ => Op::Run((tag & Op::MASK_RUN) + 1),
      },
    };

    Ok((op, len))
  }
}
