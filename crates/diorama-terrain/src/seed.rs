//! Deterministic seeded random streams.
//!
//! A [`Seed`] is hashed with SipHash (std's `DefaultHasher`, fixed keys) into
//! a `u64` that seeds a ChaCha8 generator. Subsystems never share a stream:
//! each derives its own seed by appending a component name, so drawing more
//! numbers in one place cannot shift the sequence seen by another.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Generation seed, either numeric or free text.
///
/// Deserializes from an integer, a string or a float. Integral floats become
/// [`Seed::Number`]; any other float keeps its decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "SeedRepr")]
pub enum Seed {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<SeedRepr> for Seed {
    fn from(repr: SeedRepr) -> Self {
        match repr {
            SeedRepr::Integer(n) => Seed::Number(n),
            SeedRepr::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Seed::Number(f as i64)
            }
            SeedRepr::Float(f) => Seed::Text(f.to_string()),
            SeedRepr::Text(s) => Seed::Text(s),
        }
    }
}

impl Seed {
    /// Seed for an independent stream named `component`.
    #[must_use]
    pub fn derive(&self, component: &str) -> Seed {
        Seed::Text(format!("{self}{component}"))
    }

    /// Seed of the `i`-th item of a sequence (e.g. the `i`-th placed object).
    #[must_use]
    pub fn offset(&self, i: u64) -> Seed {
        match self {
            Seed::Number(n) => Seed::Number(n.wrapping_add(i as i64)),
            Seed::Text(s) => Seed::Text(format!("{s}{i}")),
        }
    }

    /// SipHash digest of the canonical string form.
    #[must_use]
    pub fn hash_u64(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.to_string().hash(&mut hasher);
        hasher.finish()
    }

    #[must_use]
    pub fn rng(&self) -> SeedRng {
        SeedRng::new(self)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Number(0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Seed {
    fn from(n: i64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_owned())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

/// Pure function of seed and call count.
#[derive(Clone, Debug)]
pub struct SeedRng {
    rng: ChaCha8Rng,
}

impl SeedRng {
    pub fn new(seed: &Seed) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.hash_u64()),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Next value in `[0, 1)` as `f32`.
    pub fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Centred jitter in `[-amount/2, amount/2)`.
    pub fn jitter(&mut self, amount: f32) -> f32 {
        (self.next_f32() - 0.5) * amount
    }
}
