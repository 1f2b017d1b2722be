//! Light registry: the fixed, ordered set of bridged lights.
//!
//! Lights are addressed by their 1-based position in insertion order.
//! Membership is fixed at construction; only the lights' own state changes
//! afterwards, so the registry can be shared without locking.

use huebridge_domain::error::ResolutionError;
use huebridge_domain::id::LightId;

use crate::ports::Light;

/// Ordered, immutable-membership collection of lights.
pub struct LightRegistry<L> {
    lights: Vec<L>,
}

impl<L: Light> LightRegistry<L> {
    /// Create a registry; the first light gets id `1`.
    #[must_use]
    pub fn new(lights: Vec<L>) -> Self {
        Self { lights }
    }

    /// Number of registered lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether the registry holds no light.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Look up a light by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Unknown`] when `id` is greater than the
    /// number of registered lights.
    pub fn get(&self, id: LightId) -> Result<&L, ResolutionError> {
        let unknown = || ResolutionError::Unknown {
            id: id.get(),
            count: self.lights.len(),
        };
        id.index()
            .and_then(|index| self.lights.get(index))
            .ok_or_else(unknown)
    }

    /// Parse an external identifier and look the light up.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] when the identifier is not a number, is
    /// not positive, or is greater than the number of registered lights.
    pub fn resolve(&self, raw: &str) -> Result<(LightId, &L), ResolutionError> {
        let id: LightId = raw.parse()?;
        let light = self.get(id)?;
        Ok((id, light))
    }

    /// Iterate over all lights with their ids, in order.
    pub fn iter(&self) -> impl Iterator<Item = (LightId, &L)> {
        self.lights
            .iter()
            .enumerate()
            .map(|(index, light)| (LightId::from_index(index), light))
    }
}
