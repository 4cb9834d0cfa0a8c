use crate::pixel::Pixel;

// The mutable state owned by a single encode or decode pass. A fresh `State`
// is created for every call and never shared.
#[derive(Clone, Debug)]
pub struct State {
  // Recently seen pixels, each stored at its `Pixel::hash_index`. Colliding
  // pixels simply overwrite one another.
  pub cache: [Pixel; 64],
  // The previously decoded/encoded pixel.
  pub prev_pixel: Pixel,
}

impl State {
  pub fn new() -> Self {
    Self {
      cache: [Pixel::default(); 64],
      prev_pixel: Pixel::START,
    }
  }

  // Stores a copy of `pixel` in its cache slot, evicting whatever was there.
  pub fn cache_insert(&mut self, pixel: Pixel) {
    self.cache[pixel.hash_index()] = pixel;
  }

  // Returns the slot `pixel` would occupy if it's currently cached there.
  pub fn cache_lookup(&self, pixel: Pixel) -> Option<u8> {
    let index = pixel.hash_index();

    if self.cache[index] == pixel {
      return Some(index as u8);
    }

    None
  }
}
