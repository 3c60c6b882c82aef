//! Deterministic hash functions for per-chunk randomness.
//!
//! Values depend only on their inputs, never on call order, so a chunk
//! gets the same value however many times it is streamed in and out.
//!
//! # Naming Convention
//!
//! `hash{inputs}{outputs}{input_type}{output_type}{bits}`, e.g.
//! `hash31if64` takes 3 i64 values and returns one f64 in `0..1`.

/// Multiply-xorshift mixing for 64-bit values.
#[inline]
fn mix64(mut h: u64) -> u64 {
  h = h.wrapping_mul(0x517c_c1b7_2722_0a95);
  h ^= h >> 32;
  h = h.wrapping_mul(0x517c_c1b7_2722_0a95);
  h ^= h >> 32;
  h
}

/// Convert u64 to f64 in [0.0, 1.0) range.
#[inline]
fn to_frac64(h: u64) -> f64 {
  (h >> 12) as f64 * (1.0 / (1u64 << 52) as f64)
}

/// 3 u64 in, 1 u64 out.
#[inline]
pub fn hash31uu64(a: u64, b: u64, c: u64) -> u64 {
  // Mix each lane separately so (a, b, c) and (b, a, c) differ.
  mix64(mix64(mix64(a) ^ b.rotate_left(21)) ^ c.rotate_left(42))
}

/// 3 i64 in, 1 f64 out in `0..1`.
#[inline]
pub fn hash31if64(a: i64, b: i64, c: i64) -> f64 {
  to_frac64(hash31uu64(a as u64, b as u64, c as u64))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_inputs_same_output() {
    assert_eq!(hash31if64(42, 3, -2), hash31if64(42, 3, -2));
  }

  #[test]
  fn fractions_stay_in_unit_range() {
    for x in -50..50 {
      for z in -50..50 {
        let f = hash31if64(9, x, z);
        assert!((0.0..1.0).contains(&f), "{f} out of range at ({x}, {z})");
      }
    }
  }

  #[test]
  fn argument_order_matters() {
    assert_ne!(hash31uu64(1, 2, 3), hash31uu64(2, 1, 3));
    assert_ne!(hash31uu64(0, 3, -2i64 as u64), hash31uu64(0, -2i64 as u64, 3));
  }

  #[test]
  fn seed_changes_output() {
    let differing = (0..32)
      .filter(|&i| hash31if64(1, i, -i) != hash31if64(2, i, -i))
      .count();
    assert_eq!(differing, 32);
  }
}
