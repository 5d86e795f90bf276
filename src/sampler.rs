use crate::{options::Options, vecmath::Point2f, Float};

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// A source of uniform random samples in [0, 1).
pub trait SamplerI {
    /// Restarts the stream for the given sample index, so that a given
    /// (seed, index) pair always produces the same sequence.
    fn start_sample(&mut self, sample_index: u64);

    fn get_1d(&mut self) -> Float;
    fn get_2d(&mut self) -> Point2f;
}

#[derive(Debug, Clone)]
pub enum Sampler {
    Independent(IndependentSampler),
}

impl Sampler {
    pub fn from_options(options: &Options) -> Sampler {
        Sampler::Independent(IndependentSampler::new(options.seed))
    }
}

impl SamplerI for Sampler {
    fn start_sample(&mut self, sample_index: u64) {
        match self {
            Sampler::Independent(s) => s.start_sample(sample_index),
        }
    }

    fn get_1d(&mut self) -> Float {
        match self {
            Sampler::Independent(s) => s.get_1d(),
        }
    }

    fn get_2d(&mut self) -> Point2f {
        match self {
            Sampler::Independent(s) => s.get_2d(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndependentSampler {
    /// Store seed for determinism in start_sample().
    seed: u64,
    rng: SmallRng,
}

impl IndependentSampler {
    pub fn new(seed: u64) -> IndependentSampler {
        IndependentSampler {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl SamplerI for IndependentSampler {
    fn start_sample(&mut self, sample_index: u64) {
        let mixed = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(sample_index);
        self.rng = SmallRng::seed_from_u64(mixed);
    }

    fn get_1d(&mut self) -> Float {
        self.rng.gen()
    }

    fn get_2d(&mut self) -> Point2f {
        Point2f {
            x: self.rng.gen(),
            y: self.rng.gen(),
        }
    }
}
