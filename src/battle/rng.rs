use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

enum Source {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// The single random stream a battle draws from.
///
/// Every draw carries a `reason` so scripted test runs can report exactly
/// which roll ran out, and so traces show the order of draws. The order and
/// number of draws matter: replaying a seed reproduces a battle only if the
/// engine asks for the same bounds in the same sequence.
pub struct TurnRng {
    source: Source,
    seed: u64,
}

impl TurnRng {
    /// Seeded generator. A seed of `0` pulls a seed from platform entropy;
    /// the seed actually used is available from [`TurnRng::initial_seed`].
    pub fn new(seed: u64) -> Self {
        let seed = resolve_seed(seed);
        Self {
            source: Source::Seeded(StdRng::seed_from_u64(seed)),
            seed,
        }
    }

    /// Replays `outcomes` in order. Each value is clamped to `bound - 1` for
    /// the draw it answers. Panics once the script is exhausted.
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: Source::Scripted { outcomes, index: 0 },
            seed: 0,
        }
    }

    /// Reset the stream. Same seed, same sequence.
    pub fn initialize(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    pub fn initial_seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `[0, bound)`. `random(0, _)` is 0 and consumes nothing.
    pub fn random(&mut self, bound: u32, reason: &str) -> u32 {
        if bound == 0 {
            return 0;
        }
        let outcome = match &mut self.source {
            Source::Seeded(rng) => rng.random_range(0..bound),
            Source::Scripted { outcomes, index } => {
                let Some(&value) = outcomes.get(*index) else {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                value.min(bound - 1)
            }
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);
        tracing::trace!(outcome, bound, reason, "rng draw");

        outcome
    }

    /// Percentage roll: true when `random(100) < chance`.
    pub fn chance(&mut self, chance: u8, reason: &str) -> bool {
        self.random(100, reason) < u32::from(chance)
    }
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    // Zero is reserved for "pick one", so never hand it back.
    let drawn: u64 = rand::rng().random();
    drawn.max(1)
}

impl std::fmt::Debug for TurnRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Source::Seeded(_) => write!(f, "TurnRng::Seeded({})", self.seed),
            Source::Scripted { outcomes, index } => {
                write!(f, "TurnRng::Scripted({}/{})", index, outcomes.len())
            }
        }
    }
}
