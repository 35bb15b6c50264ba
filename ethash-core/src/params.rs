use serde::{Deserialize, Serialize};

use crate::error::EthashError;

/// Immutable configuration for a single evaluator instance.
///
/// Construct via [`Params::new`] (or the [`Params::tiny`] /
/// [`Params::mainnet_like`] presets) rather than building the struct
/// literal directly, since every field must satisfy the structural
/// constraints checked by [`Params::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Total cache footprint in bytes. Must be a multiple of 64 and of `mix_size`.
    pub cache_size: usize,
    /// Number of RandMemoHash passes over the cache.
    pub cache_rounds: u32,
    /// Virtual DAG footprint in bytes; never allocated. Must be a multiple of `mix_size`.
    pub dag_size: usize,
    /// FNV-mix iterations per DAG-node derivation.
    pub dag_parents: u32,
    /// Working mix width per evaluation, in bytes. Must be a multiple of 64.
    pub mix_size: usize,
    /// Outer mix iterations per `hash` call.
    pub mix_parents: u32,
}

impl Params {
    /// Validates and wraps the given fields.
    pub fn new(
        cache_size: usize,
        cache_rounds: u32,
        dag_size: usize,
        dag_parents: u32,
        mix_size: usize,
        mix_parents: u32,
    ) -> Result<Self, EthashError> {
        let params = Params {
            cache_size,
            cache_rounds,
            dag_size,
            dag_parents,
            mix_size,
            mix_parents,
        };
        params.validate()?;
        Ok(params)
    }

    /// Tiny parameters sized for millisecond-scale conformance tests.
    pub fn tiny() -> Self {
        Params {
            cache_size: 1024,
            cache_rounds: 2,
            dag_size: 2048,
            dag_parents: 4,
            mix_size: 128,
            mix_parents: 3,
        }
    }

    /// Production-scale parameters in the shape of mainnet Ethash epoch 0
    /// (16 MiB light cache, 1 GiB DAG, 64 parents, 128-byte mix).
    pub fn mainnet_like() -> Self {
        Params {
            cache_size: 16 * 1024 * 1024,
            cache_rounds: 3,
            dag_size: 1024 * 1024 * 1024,
            dag_parents: 64,
            mix_size: 128,
            mix_parents: 64,
        }
    }

    /// Checks the structural constraints §7 requires for the rest of the
    /// pipeline to be well-defined.
    pub fn validate(&self) -> Result<(), EthashError> {
        if self.cache_size % 64 != 0 {
            return Err(EthashError::InvalidParams {
                reason: "cache_size must be a multiple of 64".into(),
            });
        }
        if self.mix_size % 64 != 0 {
            return Err(EthashError::InvalidParams {
                reason: "mix_size must be a multiple of 64".into(),
            });
        }
        if self.cache_size % self.mix_size != 0 {
            return Err(EthashError::InvalidParams {
                reason: "cache_size must be a multiple of mix_size".into(),
            });
        }
        if self.dag_size % self.mix_size != 0 {
            return Err(EthashError::InvalidParams {
                reason: "dag_size must be a multiple of mix_size".into(),
            });
        }
        if self.dag_parents == 0 {
            return Err(EthashError::InvalidParams {
                reason: "dag_parents must be positive".into(),
            });
        }
        if self.mix_parents == 0 {
            return Err(EthashError::InvalidParams {
                reason: "mix_parents must be positive".into(),
            });
        }
        if self.cache_rounds == 0 {
            // cache_rounds = 0 is a legal boundary case (§8): it just leaves
            // the cache at the end of Phase A. Nothing to validate here.
        }
        let dag_page_count = self.dag_page_count();
        if dag_page_count == 0 || !dag_page_count.is_power_of_two() {
            return Err(EthashError::InvalidParams {
                reason: "dag_size / mix_size must be a positive power of two".into(),
            });
        }
        Ok(())
    }

    /// Number of 64-byte nodes in the cache.
    #[inline]
    pub fn cache_node_count(&self) -> usize {
        self.cache_size / 64
    }

    /// Number of 32-bit words in the working mix.
    #[inline]
    pub fn mix_word_count(&self) -> usize {
        self.mix_size / 4
    }

    /// Number of 16-word (64-byte) DAG nodes spanned by one mix page.
    #[inline]
    pub fn mix_node_count(&self) -> usize {
        self.mix_word_count() / 16
    }

    /// Number of mix-sized pages the virtual DAG is divided into.
    #[inline]
    pub fn dag_page_count(&self) -> usize {
        self.dag_size / self.mix_size
    }
}
