//! Emission scenarios
//!
//! A scenario is a prescribed anthropogenic emission rate (GtC/yr) on a uniform
//! time grid, plus the metadata that generated it.
//!
//! # Emission profile
//!
//! The profile is a pure function of [`ScenarioMetadata`]. With blend length
//! $b = t_{decarb} \cdot f_{ppf}$ and long-term floor $\epsilon_{lt}$:
//!
//! - before the peak ($d = t_{peak} - t \ge 0$):
//!   $$\epsilon(t) = E_{peak} \exp\left(-k \left[d - b(1 - e^{-d/b})\right]\right)$$
//! - after the peak ($u = t - t_{peak} > 0$):
//!   $$\epsilon(t) = \epsilon_{lt} + (E_{peak} - \epsilon_{lt}) \exp\left(-\frac{u - b(1 - e^{-u/b})}{t_{decarb}}\right)$$
//!
//! Both branches have zero slope at $t_{peak}$, so the curve is continuous and
//! continuously differentiable there. Far from the peak the rise grows at rate
//! $k$ and the decay has e-folding time $t_{decarb}$; $b$ controls where the
//! flat top blends into those asymptotes. $E_{peak}$ is chosen so that
//! $\epsilon(t_0) = \epsilon_0$.

use crate::errors::{CambioError, CambioResult};
use crate::timeseries::{time_grid, validate_time_axis, FloatValue, Time};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Blend factor used when a scenario does not specify `t_decarb_ppf_factor`.
pub const DEFAULT_DECARB_PPF_FACTOR: FloatValue = 0.5;

pub const KEY_T_0: &str = "t_0";
pub const KEY_EPS_0: &str = "eps_0";
pub const KEY_T_PEAK: &str = "t_peak";
pub const KEY_T_DECARB: &str = "t_decarb";
pub const KEY_K: &str = "k";
pub const KEY_EPS_LONG_TERM: &str = "epslongterm";
pub const KEY_DECARB_PPF_FACTOR: &str = "t_decarb_ppf_factor";
pub const KEY_DESCRIPTION: &str = "description";

/// A value in the loose, dictionary-style metadata form used for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Number(FloatValue),
    Text(String),
}

/// Loose metadata as stored alongside a scenario.
pub type MetadataMap = BTreeMap<String, MetadataValue>;

/// The parameters that generated an emission scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Growth rate of emissions well before the peak.
    /// unit: 1/yr
    pub k: FloatValue,
    /// Emission rate at the reference year.
    /// unit: GtC/yr
    pub eps_0: FloatValue,
    /// Reference year.
    pub t_0: Time,
    /// Year of peak emissions.
    pub t_peak: Time,
    /// Decarbonization timescale after the peak.
    /// unit: yr
    pub t_decarb: FloatValue,
    /// Floor that emissions decay toward after the peak.
    /// unit: GtC/yr
    pub epslongterm: Option<FloatValue>,
    /// Blend length as a fraction of `t_decarb`.
    pub t_decarb_ppf_factor: Option<FloatValue>,
    #[serde(default)]
    pub description: String,
}

impl ScenarioMetadata {
    /// Read a metadata record out of its loose map form.
    pub fn from_map(map: &MetadataMap) -> CambioResult<Self> {
        Ok(Self {
            k: required_number(map, KEY_K)?,
            eps_0: required_number(map, KEY_EPS_0)?,
            t_0: required_number(map, KEY_T_0)?,
            t_peak: required_number(map, KEY_T_PEAK)?,
            t_decarb: required_number(map, KEY_T_DECARB)?,
            epslongterm: optional_number(map, KEY_EPS_LONG_TERM)?,
            t_decarb_ppf_factor: optional_number(map, KEY_DECARB_PPF_FACTOR)?,
            description: match map.get(KEY_DESCRIPTION) {
                Some(MetadataValue::Text(text)) => text.clone(),
                Some(MetadataValue::Number(value)) => value.to_string(),
                None => String::new(),
            },
        })
    }

    pub fn to_map(&self) -> MetadataMap {
        let mut map = MetadataMap::new();
        let mut put = |key: &str, value: FloatValue| {
            map.insert(key.to_string(), MetadataValue::Number(value));
        };
        put(KEY_K, self.k);
        put(KEY_EPS_0, self.eps_0);
        put(KEY_T_0, self.t_0);
        put(KEY_T_PEAK, self.t_peak);
        put(KEY_T_DECARB, self.t_decarb);
        if let Some(value) = self.epslongterm {
            put(KEY_EPS_LONG_TERM, value);
        }
        if let Some(value) = self.t_decarb_ppf_factor {
            put(KEY_DECARB_PPF_FACTOR, value);
        }
        map.insert(
            KEY_DESCRIPTION.to_string(),
            MetadataValue::Text(self.description.clone()),
        );
        map
    }

    pub fn long_term_emissions(&self) -> FloatValue {
        self.epslongterm.unwrap_or(0.0)
    }

    pub fn decarb_ppf_factor(&self) -> FloatValue {
        self.t_decarb_ppf_factor.unwrap_or(DEFAULT_DECARB_PPF_FACTOR)
    }
}

fn required_number(map: &MetadataMap, key: &str) -> CambioResult<FloatValue> {
    optional_number(map, key)?.ok_or_else(|| CambioError::MissingScenarioMetadata {
        key: key.to_string(),
    })
}

fn optional_number(map: &MetadataMap, key: &str) -> CambioResult<Option<FloatValue>> {
    match map.get(key) {
        None => Ok(None),
        Some(MetadataValue::Number(value)) => Ok(Some(*value)),
        Some(MetadataValue::Text(text)) => Err(CambioError::InvalidScenarioParameters(format!(
            "metadata key `{key}` must be numeric, got {text:?}"
        ))),
    }
}

fn invalid(message: String) -> CambioError {
    CambioError::InvalidScenarioParameters(message)
}

/// The emission rate as a continuous function of time.
///
/// Construction validates the metadata and solves for the peak emission rate.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionProfile {
    k: FloatValue,
    t_peak: Time,
    t_decarb: FloatValue,
    blend: FloatValue,
    floor: FloatValue,
    peak: FloatValue,
}

impl EmissionProfile {
    pub fn from_metadata(metadata: &ScenarioMetadata) -> CambioResult<Self> {
        let checks = [
            (KEY_K, metadata.k),
            (KEY_EPS_0, metadata.eps_0),
            (KEY_T_0, metadata.t_0),
            (KEY_T_PEAK, metadata.t_peak),
            (KEY_T_DECARB, metadata.t_decarb),
            (KEY_EPS_LONG_TERM, metadata.long_term_emissions()),
            (KEY_DECARB_PPF_FACTOR, metadata.decarb_ppf_factor()),
        ];
        if let Some((key, value)) = checks.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!("{key} must be finite, got {value}")));
        }
        if metadata.k <= 0.0 {
            return Err(invalid(format!("k must be positive, got {}", metadata.k)));
        }
        if metadata.eps_0 <= 0.0 {
            return Err(invalid(format!(
                "eps_0 must be positive, got {}",
                metadata.eps_0
            )));
        }
        if metadata.t_decarb <= 0.0 {
            return Err(invalid(format!(
                "t_decarb must be positive, got {}",
                metadata.t_decarb
            )));
        }
        if metadata.decarb_ppf_factor() <= 0.0 {
            return Err(invalid(format!(
                "t_decarb_ppf_factor must be positive, got {}",
                metadata.decarb_ppf_factor()
            )));
        }
        let floor = metadata.long_term_emissions();
        if floor < 0.0 {
            return Err(invalid(format!(
                "epslongterm must not be negative, got {floor}"
            )));
        }

        let mut profile = Self {
            k: metadata.k,
            t_peak: metadata.t_peak,
            t_decarb: metadata.t_decarb,
            blend: metadata.t_decarb * metadata.decarb_ppf_factor(),
            floor,
            peak: 1.0,
        };

        profile.peak = if metadata.t_0 <= metadata.t_peak {
            metadata.eps_0 / profile.rise_factor(metadata.t_0)
        } else {
            if metadata.eps_0 <= floor {
                return Err(invalid(format!(
                    "eps_0 ({}) at a post-peak reference year must exceed epslongterm ({floor})",
                    metadata.eps_0
                )));
            }
            floor + (metadata.eps_0 - floor) / profile.decay_factor(metadata.t_0)
        };

        if !profile.peak.is_finite() {
            return Err(invalid(format!(
                "peak emission rate is not representable (reference year {} is too far from the peak)",
                metadata.t_0
            )));
        }
        if floor >= profile.peak {
            return Err(invalid(format!(
                "epslongterm ({floor}) must be below the peak emission rate ({})",
                profile.peak
            )));
        }
        Ok(profile)
    }

    /// Emission rate at the peak year.
    pub fn peak(&self) -> FloatValue {
        self.peak
    }

    pub fn t_peak(&self) -> Time {
        self.t_peak
    }

    /// Emission rate at time `t`.
    pub fn rate(&self, t: Time) -> FloatValue {
        if t <= self.t_peak {
            self.peak * self.rise_factor(t)
        } else {
            self.floor + (self.peak - self.floor) * self.decay_factor(t)
        }
    }

    /// Fraction of the peak rate reached at `t <= t_peak`.
    fn rise_factor(&self, t: Time) -> FloatValue {
        let d = self.t_peak - t;
        (-self.k * blended_distance(d, self.blend)).exp()
    }

    /// Fraction of the peak excess over the floor remaining at `t > t_peak`.
    fn decay_factor(&self, t: Time) -> FloatValue {
        let u = t - self.t_peak;
        (-blended_distance(u, self.blend) / self.t_decarb).exp()
    }
}

/// $x - b(1 - e^{-x/b})$: quadratic near zero, linear (offset by $b$) far away.
fn blended_distance(x: FloatValue, blend: FloatValue) -> FloatValue {
    x + blend * (-x / blend).exp_m1()
}

/// Builds an [`EmissionScenario`] from growth, peak and decarbonization parameters.
#[derive(Debug, Clone)]
pub struct EmissionScenarioBuilder {
    t_start: Time,
    t_stop: Time,
    nsteps: usize,
    metadata: ScenarioMetadata,
}

impl EmissionScenarioBuilder {
    /// Start a builder on the grid `[t_start, t_stop]` with `nsteps` points.
    ///
    /// Emissions grow at rate `k`, pass through `eps_0` at `t_0`, peak at
    /// `t_peak` and then decay on the timescale `t_decarb`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t_start: Time,
        t_stop: Time,
        nsteps: usize,
        k: FloatValue,
        eps_0: FloatValue,
        t_0: Time,
        t_peak: Time,
        t_decarb: FloatValue,
    ) -> Self {
        Self {
            t_start,
            t_stop,
            nsteps,
            metadata: ScenarioMetadata {
                k,
                eps_0,
                t_0,
                t_peak,
                t_decarb,
                epslongterm: None,
                t_decarb_ppf_factor: None,
                description: String::new(),
            },
        }
    }

    /// Decay toward `epslongterm` instead of zero after the peak.
    pub fn with_long_term_emissions(mut self, epslongterm: FloatValue) -> Self {
        self.metadata.epslongterm = Some(epslongterm);
        self
    }

    pub fn with_decarb_ppf_factor(mut self, factor: FloatValue) -> Self {
        self.metadata.t_decarb_ppf_factor = Some(factor);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = description.into();
        self
    }

    pub fn build(self) -> CambioResult<EmissionScenario> {
        let time = time_grid(self.t_start, self.t_stop, self.nsteps)?;
        let t_peak = self.metadata.t_peak;
        if !(self.t_start..=self.t_stop).contains(&t_peak) {
            return Err(invalid(format!(
                "t_peak ({t_peak}) must lie within [{}, {}]",
                self.t_start, self.t_stop
            )));
        }
        let profile = EmissionProfile::from_metadata(&self.metadata)?;
        let emission_rate = time.mapv(|t| profile.rate(t));

        debug!(
            nsteps = self.nsteps,
            t_peak,
            peak_emissions = profile.peak(),
            "Built emission scenario"
        );

        Ok(EmissionScenario {
            time,
            emission_rate,
            metadata: self.metadata,
        })
    }
}

/// Emission rates on a time grid, plus the metadata that generated them.
///
/// Deserialization goes through [`EmissionScenario::from_parts`], so a decoded
/// scenario satisfies the same checks as one assembled in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioParts")]
pub struct EmissionScenario {
    time: Array1<Time>,
    emission_rate: Array1<FloatValue>,
    metadata: ScenarioMetadata,
}

/// Unvalidated field layout of a serialized [`EmissionScenario`].
#[derive(Deserialize)]
struct ScenarioParts {
    time: Array1<Time>,
    emission_rate: Array1<FloatValue>,
    metadata: ScenarioMetadata,
}

impl TryFrom<ScenarioParts> for EmissionScenario {
    type Error = CambioError;

    fn try_from(parts: ScenarioParts) -> CambioResult<Self> {
        EmissionScenario::from_parts(parts.time, parts.emission_rate, parts.metadata)
    }
}

impl EmissionScenario {
    /// Assemble a scenario from existing series, e.g. one read back from storage.
    pub fn from_parts(
        time: Array1<Time>,
        emission_rate: Array1<FloatValue>,
        metadata: ScenarioMetadata,
    ) -> CambioResult<Self> {
        if time.len() != emission_rate.len() {
            return Err(CambioError::ScenarioMismatch {
                time_len: time.len(),
                emission_len: emission_rate.len(),
            });
        }
        if time.len() < 2 {
            return Err(invalid(format!(
                "a scenario needs at least 2 time points, got {}",
                time.len()
            )));
        }
        validate_time_axis(time.view())?;
        EmissionProfile::from_metadata(&metadata)?;
        Ok(Self {
            time,
            emission_rate,
            metadata,
        })
    }

    pub fn time(&self) -> &Array1<Time> {
        &self.time
    }

    pub fn emission_rate(&self) -> &Array1<FloatValue> {
        &self.emission_rate
    }

    pub fn metadata(&self) -> &ScenarioMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Recompute the emission series from the metadata on this scenario's grid.
    pub fn regenerate(&self) -> CambioResult<Array1<FloatValue>> {
        let profile = EmissionProfile::from_metadata(&self.metadata)?;
        Ok(self.time.mapv(|t| profile.rate(t)))
    }
}
