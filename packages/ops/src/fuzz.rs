//! Randomised field values for test fixtures.

use fieldkit_mirror::{from_value, snapshot, FieldWrite, Result, Scalar, Value};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Builder;

/// Ranges used when fuzzing.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzConfig {
    /// Integers are drawn from `0..=int_max`, capped at the field type's max.
    pub int_max: u64,
    /// Floats are drawn from `0.0..=float_max`, capped at the field type's
    /// max. A NaN or non-positive bound yields `0.0`.
    pub float_max: f64,
    /// Length of generated string tokens.
    pub token_len: usize,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            int_max: 1000,
            float_max: 100.0,
            token_len: 8,
        }
    }
}

/// A copy of `v` with its scalar fields randomised, using the thread RNG and
/// the default ranges.
pub fn fuzz<T>(v: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    fuzz_with(v, &mut rand::thread_rng(), &FuzzConfig::default())
}

/// A copy of `v` with each immediate named integer, float, bool and string
/// field replaced by a random value. Other fields are copied unchanged.
pub fn fuzz_with<T, R>(v: &T, rng: &mut R, config: &FuzzConfig) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    R: Rng,
{
    let value = snapshot(v);
    let mut out: T = from_value(&value)?;

    let mut fields = Vec::new();
    for child in value.into_children() {
        let Some(label) = child.label else {
            continue;
        };
        let Value::Scalar(scalar) = &child.value else {
            continue;
        };
        if let Some(random) = random_scalar(scalar, rng, config) {
            log::trace!("Fuzzing field {} ({})", label, scalar.type_name());
            fields.push((label, Value::Scalar(random)));
        }
    }

    out.write_fields(fields.iter().map(|(label, v)| (label.as_str(), v)))?;
    Ok(out)
}

fn bounded<R: Rng>(rng: &mut R, config: &FuzzConfig, type_max: u64) -> u64 {
    rng.gen_range(0..=config.int_max.min(type_max))
}

fn float_bound(config: &FuzzConfig, type_max: f64) -> f64 {
    let max = config.float_max;
    if max.is_nan() || max <= 0.0 {
        0.0
    } else {
        max.min(type_max)
    }
}

// The sampler needs a finite span, so f64 ranges stop at half of f64::MAX.
const F64_SPAN_MAX: f64 = f64::MAX / 2.0;

fn random_scalar<R: Rng>(
    scalar: &Scalar,
    rng: &mut R,
    config: &FuzzConfig,
) -> Option<Scalar> {
    // Each cast is in range: `bounded` never exceeds the type's max.
    let random = match scalar {
        Scalar::I8(_) => Scalar::I8(bounded(rng, config, i8::MAX as u64) as i8),
        Scalar::I16(_) => Scalar::I16(bounded(rng, config, i16::MAX as u64) as i16),
        Scalar::I32(_) => Scalar::I32(bounded(rng, config, i32::MAX as u64) as i32),
        Scalar::I64(_) => Scalar::I64(bounded(rng, config, i64::MAX as u64) as i64),
        Scalar::I128(_) => Scalar::I128(bounded(rng, config, u64::MAX) as i128),
        Scalar::U8(_) => Scalar::U8(bounded(rng, config, u8::MAX as u64) as u8),
        Scalar::U16(_) => Scalar::U16(bounded(rng, config, u16::MAX as u64) as u16),
        Scalar::U32(_) => Scalar::U32(bounded(rng, config, u32::MAX as u64) as u32),
        Scalar::U64(_) => Scalar::U64(bounded(rng, config, u64::MAX)),
        Scalar::U128(_) => Scalar::U128(bounded(rng, config, u64::MAX) as u128),
        Scalar::F32(_) => Scalar::F32(rng.gen_range(0.0..=float_bound(config, f32::MAX as f64)) as f32),
        Scalar::F64(_) => Scalar::F64(rng.gen_range(0.0..=float_bound(config, F64_SPAN_MAX))),
        Scalar::Bool(_) => Scalar::Bool(rng.gen_bool(0.5)),
        Scalar::Str(_) => Scalar::Str(token(rng, config.token_len)),
        Scalar::Unit | Scalar::Char(_) | Scalar::Bytes(_) => return None,
    };
    Some(random)
}

/// A random lowercase hex token cut from v4 UUIDs.
fn token<R: Rng>(rng: &mut R, len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        let uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
        out.push_str(&uuid.simple().to_string());
    }
    out.truncate(len);
    out
}
