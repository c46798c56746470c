use bosk_geom::Pos3;
use rand::Rng;

/// Candidate-site selector: a finite, non-restartable sequence of up to
/// `attempts` coordinates around an origin.
///
/// Each offset component is the difference of two uniform draws in
/// `[0, 2*spread)`, so candidates fall off triangularly toward the origin.
/// The selector does no filtering and never touches the grid; it only
/// consumes entropy.
#[derive(Clone, Debug)]
pub struct Scatter {
    origin: Pos3,
    remaining: u32,
    spread_xz: i32,
    spread_y: i32,
}

impl Scatter {
    pub fn new(origin: Pos3, attempts: u32, spread_xz: i32, spread_y: i32) -> Self {
        Self {
            origin,
            remaining: attempts,
            spread_xz,
            spread_y,
        }
    }

    /// Draw the next candidate. Pull form, so drivers can interleave their
    /// own entropy draws (height, facing) between sites.
    pub fn next_site<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Pos3> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let dx = triangular(rng, self.spread_xz);
        let dy = triangular(rng, self.spread_y);
        let dz = triangular(rng, self.spread_xz);
        Some(self.origin.offset(dx, dy, dz))
    }

    /// Iterator adapter for callers that only filter the yielded sites.
    pub fn sites<R: Rng + ?Sized>(self, rng: &mut R) -> Sites<'_, R> {
        Sites { scatter: self, rng }
    }
}

#[inline]
fn triangular<R: Rng + ?Sized>(rng: &mut R, spread: i32) -> i32 {
    if spread <= 0 {
        return 0;
    }
    rng.gen_range(0..2 * spread) - rng.gen_range(0..2 * spread)
}

pub struct Sites<'r, R: Rng + ?Sized> {
    scatter: Scatter,
    rng: &'r mut R,
}

impl<R: Rng + ?Sized> Iterator for Sites<'_, R> {
    type Item = Pos3;

    fn next(&mut self) -> Option<Pos3> {
        self.scatter.next_site(self.rng)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.scatter.remaining as usize))
    }
}
