//! Template selection for new pool members.

use rand::Rng;

/// Picks a template index uniformly from `0..len`, every template included.
///
/// # Panics
/// Panics if `len` is zero. Definitions are validated non-empty before a
/// pool can sample from them.
pub fn pick_template_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}
