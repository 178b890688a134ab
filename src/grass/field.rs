use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::grass::{DEFAULT_BLADE_COUNT, DEFAULT_FIELD_EXTENT, DEFAULT_FIELD_SEED};
use crate::error::{GeometryError, GeometryResult};
use crate::grass::blade::{BladeDescriptor, BladeGenerator, GrassParams};
use crate::random::{RandomSource, SeededRandom};

/// Batch settings for a square patch of grass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassFieldSettings {
    pub blade_count: u32,
    /// Side length of the patch, centred on the origin in the ground plane
    pub extent: f32,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for GrassFieldSettings {
    fn default() -> Self {
        Self {
            blade_count: DEFAULT_BLADE_COUNT,
            extent: DEFAULT_FIELD_EXTENT,
            seed: DEFAULT_FIELD_SEED,
            parallel: true,
        }
    }
}

impl GrassFieldSettings {
    pub fn validate(&self) -> GeometryResult<()> {
        if self.blade_count == 0 {
            return Err(GeometryError::InvalidConfig(
                "grass field blade_count must be greater than zero".to_string(),
            ));
        }
        if !self.extent.is_finite() || self.extent < 0.0 {
            return Err(GeometryError::InvalidConfig(format!(
                "grass field extent must be finite and non-negative, got {}",
                self.extent
            )));
        }
        Ok(())
    }

    /// Cells per side of the jitter grid
    fn grid_side(&self) -> u32 {
        (self.blade_count as f64).sqrt().ceil() as u32
    }

    /// Jittered position of blade `index` inside its grid cell
    fn base_position(&self, index: u32, random: &mut impl RandomSource) -> Vec3 {
        let side = self.grid_side();
        let cell = self.extent / side as f32;
        let half = self.extent * 0.5;
        let col = (index % side) as f32 + random.uniform(0.0, 1.0);
        let row = (index / side) as f32 + random.uniform(0.0, 1.0);
        Vec3::new(col * cell - half, row * cell - half, 0.0)
    }
}

/// All blade descriptors of one patch
#[derive(Debug, Clone)]
pub struct GrassField {
    pub blades: Vec<BladeDescriptor>,
    params: GrassParams,
    settings: GrassFieldSettings,
    passes: u64,
}

impl GrassField {
    /// Generate every blade of the patch.
    ///
    /// Blade `i` always draws from the stream for `(seed, i)`, so the parallel
    /// and sequential paths produce the same field.
    pub fn generate(params: GrassParams, settings: GrassFieldSettings) -> GeometryResult<Self> {
        params.validate()?;
        settings.validate()?;

        let build = |index: u32| {
            let mut random = SeededRandom::for_item(settings.seed, index as u64);
            let base = settings.base_position(index, &mut random);
            BladeGenerator::from_validated(params, random).initialise(base)
        };

        let blades: Vec<BladeDescriptor> = if settings.parallel {
            (0..settings.blade_count).into_par_iter().map(build).collect()
        } else {
            (0..settings.blade_count).map(build).collect()
        };

        log::debug!(
            "Generated grass field: {} blades over {}x{} (seed {}, parallel {})",
            blades.len(),
            settings.extent,
            settings.extent,
            settings.seed,
            settings.parallel
        );

        Ok(Self {
            blades,
            params,
            settings,
            passes: 0,
        })
    }

    /// Re-randomise height, width and facing of every blade. Base positions
    /// are kept and each pass uses fresh streams.
    pub fn regenerate(&mut self) {
        self.passes += 1;
        let pass_seed = self.settings.seed ^ self.passes.rotate_left(32);
        let params = self.params;

        let update = |(index, blade): (usize, &mut BladeDescriptor)| {
            let random = SeededRandom::for_item(pass_seed, index as u64);
            BladeGenerator::from_validated(params, random).update_packed_vec4s(blade);
        };

        if self.settings.parallel {
            self.blades.par_iter_mut().enumerate().for_each(update);
        } else {
            self.blades.iter_mut().enumerate().for_each(update);
        }

        log::debug!("Regenerated {} blades (pass {})", self.blades.len(), self.passes);
    }

    pub fn len(&self) -> usize {
        self.blades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blades.is_empty()
    }

    pub fn settings(&self) -> &GrassFieldSettings {
        &self.settings
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blades)
    }
}
