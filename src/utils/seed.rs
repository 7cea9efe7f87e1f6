//! Process-wide deterministic random number generation.
//!
//! [`set_seed`] reseeds one global [`StdRng`] and forwards the seed to every
//! hook registered with [`register_seed_hook`], so other generators owned by
//! the application can follow along.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Callback invoked with the seed on every [`set_seed`].
pub type SeedHook = Arc<dyn Fn(u64) + Send + Sync>;

struct SeedState {
    seed: Option<u64>,
    rng: Option<StdRng>,
}

static STATE: Mutex<SeedState> = Mutex::new(SeedState {
    seed: None,
    rng: None,
});
static HOOKS: Mutex<Vec<SeedHook>> = Mutex::new(Vec::new());

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reseed the global generator and run every seed hook.
pub fn set_seed(seed: u64) {
    debug!("Setting global seed to {}", seed);
    {
        let mut state = lock(&STATE);
        state.seed = Some(seed);
        state.rng = Some(StdRng::seed_from_u64(seed));
    }

    // Cloned so hooks may call back into this module.
    let hooks: Vec<SeedHook> = lock(&HOOKS).clone();
    for hook in hooks {
        hook(seed);
    }
}

/// The seed passed to the last [`set_seed`], if any.
pub fn current_seed() -> Option<u64> {
    lock(&STATE).seed
}

/// Run `f` with the global generator.
///
/// Before any [`set_seed`] the generator is seeded from the OS. The lock is
/// not held while `f` runs, so `f` may call back into this module. A
/// [`set_seed`] made inside `f` wins over the generator `f` was given, and a
/// nested `with_rng` sees a fresh OS-seeded generator.
pub fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut StdRng) -> R,
{
    let mut rng = lock(&STATE)
        .rng
        .take()
        .unwrap_or_else(StdRng::from_os_rng);
    let out = f(&mut rng);

    let mut state = lock(&STATE);
    if state.rng.is_none() {
        state.rng = Some(rng);
    }
    out
}

/// A new generator seeded from the global one.
///
/// After a [`set_seed`] the sequence of forked generators is reproducible.
pub fn seeded_rng() -> StdRng {
    with_rng(|rng| StdRng::from_rng(rng))
}

/// Call `hook` with the seed on every future [`set_seed`].
pub fn register_seed_hook<F>(hook: F)
where
    F: Fn(u64) + Send + Sync + 'static,
{
    lock(&HOOKS).push(Arc::new(hook));
}
