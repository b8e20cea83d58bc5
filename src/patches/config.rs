//! Selection of the building-AI patches a session loads.
//!
//! # Presets
//!
//! - [`BuildingPatchConfig::default()`] - Every patch enabled
//! - [`BuildingPatchConfig::none()`] - Nothing enabled; combine with `with_*`
//!
//! # Example
//!
//! ```rust
//! use hostpatch::patches::BuildingPatchConfig;
//!
//! let config = BuildingPatchConfig::none().with_construction_gating(true);
//! assert!(config.construction_gating);
//! assert!(!config.weather_doors);
//! assert_eq!(config.enabled_count(), 2);
//! ```

/// Which building-AI patches to register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingPatchConfig {
    /// Report problem-timer transitions of commercial buildings and workplaces.
    pub problem_timers: bool,

    /// Replace the construction time of zoned buildings.
    pub construction_time: bool,

    /// Switch building lights off at night.
    pub lights: bool,

    /// Unspawn citizens at the door in bad weather.
    pub weather_doors: bool,

    /// Gate construction and upgrades on the construction authority.
    pub construction_gating: bool,
}

impl Default for BuildingPatchConfig {
    fn default() -> Self {
        BuildingPatchConfig {
            problem_timers: true,
            construction_time: true,
            lights: true,
            weather_doors: true,
            construction_gating: true,
        }
    }
}

impl BuildingPatchConfig {
    /// Creates the default configuration, every patch enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables every patch.
    #[must_use]
    pub fn none() -> Self {
        BuildingPatchConfig {
            problem_timers: false,
            construction_time: false,
            lights: false,
            weather_doors: false,
            construction_gating: false,
        }
    }

    /// Enables or disables the problem-timer patches.
    #[must_use]
    pub fn with_problem_timers(mut self, enabled: bool) -> Self {
        self.problem_timers = enabled;
        self
    }

    /// Enables or disables the construction-time patch.
    #[must_use]
    pub fn with_construction_time(mut self, enabled: bool) -> Self {
        self.construction_time = enabled;
        self
    }

    /// Enables or disables the lighting patches.
    #[must_use]
    pub fn with_lights(mut self, enabled: bool) -> Self {
        self.lights = enabled;
        self
    }

    /// Enables or disables the weather-door patch.
    #[must_use]
    pub fn with_weather_doors(mut self, enabled: bool) -> Self {
        self.weather_doors = enabled;
        self
    }

    /// Enables or disables the construction-gating patches.
    #[must_use]
    pub fn with_construction_gating(mut self, enabled: bool) -> Self {
        self.construction_gating = enabled;
        self
    }

    /// Number of host methods the enabled patches hook.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        [
            (self.problem_timers, 2_usize),
            (self.construction_time, 1),
            (self.lights, 2),
            (self.weather_doors, 1),
            (self.construction_gating, 2),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, methods)| methods)
        .sum()
    }
}
