//! Track selection
//!
//! Random selection over the main pool with a rare detour into the
//! alternate pool, avoiding an immediate repeat of the current track.

use crate::types::{TrackId, TrackPool};
use rand::Rng;

/// Pick the first track of a session, uniformly from the main pool
pub fn pick_initial<R: Rng + ?Sized>(pool: &TrackPool, rng: &mut R) -> TrackId {
    choose(pool.main(), rng)
}

/// Pick the track to play after `current`
///
/// With probability `alternate_probability` the pick comes from the
/// alternate pool regardless of `current`. Otherwise the main pool is
/// resampled until the pick differs from `current`; a single-entry pool is
/// never resampled.
pub fn pick_next<R: Rng + ?Sized>(
    current: Option<&TrackId>,
    pool: &TrackPool,
    rng: &mut R,
    alternate_probability: f64,
) -> TrackId {
    let probability = if alternate_probability.is_nan() {
        0.0
    } else {
        alternate_probability.clamp(0.0, 1.0)
    };

    if !pool.alternate().is_empty() && rng.gen_bool(probability) {
        let pick = choose(pool.alternate(), rng);
        tracing::info!(track = %pick, "Picked from alternate pool");
        return pick;
    }

    let main = pool.main();
    loop {
        let pick = choose(main, rng);
        if main.len() <= 1 || current != Some(&pick) {
            return pick;
        }
    }
}

/// Uniform pick; `tracks` must be non-empty
fn choose<R: Rng + ?Sized>(tracks: &[TrackId], rng: &mut R) -> TrackId {
    tracks[rng.gen_range(0..tracks.len())].clone()
}
