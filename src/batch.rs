// Batch transcoding.
//
// Calls share nothing but the read-only `Config`, so a batch can fan out
// across threads. With the `parallel` feature the rayon pool is used;
// otherwise inputs are processed in order on the calling thread. Results
// always come back in input order, one per input.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::CodePoint;
use crate::codec;
use crate::config::Config;
use crate::error::Result;

/// Encode every input independently.
pub fn encode_all<I>(config: &Config, inputs: &[I]) -> Vec<Result<Vec<CodePoint>>>
where
    I: AsRef<[CodePoint]> + Sync,
{
    transcode_all(inputs, |input| codec::encode(config, input))
}

/// Decode every input independently.
pub fn decode_all<I>(config: &Config, inputs: &[I]) -> Vec<Result<Vec<CodePoint>>>
where
    I: AsRef<[CodePoint]> + Sync,
{
    transcode_all(inputs, |input| codec::decode(config, input))
}

fn transcode_all<I, F>(inputs: &[I], f: F) -> Vec<Result<Vec<CodePoint>>>
where
    I: AsRef<[CodePoint]> + Sync,
    F: Fn(&[CodePoint]) -> Result<Vec<CodePoint>> + Send + Sync,
{
    log::debug!("batch: {} inputs", inputs.len());

    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(|input| f(input.as_ref())).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(|input| f(input.as_ref())).collect()
    }
}
