//! Capability ports consumed by the building-AI hooks.
//!
//! The interception core owns none of these; it only threads their answers
//! through the invocation context. Implementations live with the simulation
//! that decides construction, weather and lighting.
//!
//! [`PatchServices`] bundles the ports and is handed to patch registration
//! explicitly. A missing port disables the decisions that depend on it, and the
//! affected hooks fall back to the host's original behavior.

use std::{fmt, sync::Arc};

use crate::host::{Building, CitizenInfo, InfoMode, Randomizer, ServiceCategory, Vector3};

/// Decides when buildings may be constructed or upgraded.
pub trait ConstructionAuthority: Send + Sync {
    /// Whether a building of `service` may be built (no id) or upgraded (with id).
    fn can_build_or_upgrade(&self, service: ServiceCategory, building_id: Option<u16>) -> bool;

    /// Records that construction of `building_id` has started.
    fn register_constructing_building(&self, building_id: u16, service: ServiceCategory);

    /// Construction time to report for new buildings.
    fn construction_time(&self) -> i32;
}

/// Receives problem-timer transitions detected across a simulation step.
pub trait ProblemReporter: Send + Sync {
    /// The outgoing-goods problem timer of `building_id` changed from `previous`.
    fn process_building_problems(&self, building_id: u16, previous: u8);

    /// The worker problem timer of `building_id` changed from `previous`.
    fn process_worker_problems(&self, building_id: u16, previous: u8);
}

/// Current weather.
pub trait WeatherQuery: Send + Sync {
    /// Whether citizens should avoid staying outdoors.
    fn is_bad_weather(&self) -> bool;
}

/// Night-time lighting decisions.
pub trait LightingPolicy: Send + Sync {
    /// Whether `building_id` should render with its lights off.
    fn should_switch_building_lights_off(&self, building_id: u16) -> bool;
}

/// The host's active UI overlay.
pub trait InfoViewQuery: Send + Sync {
    /// Currently displayed overlay.
    fn current_mode(&self) -> InfoMode;
}

/// The host's own spawn-position calculation, reached without interception.
pub trait SpawnPositionCalculator: Send + Sync {
    /// Returns `(position, target)` for a citizen leaving `building_id`.
    fn calculate_spawn_position(
        &self,
        building_id: u16,
        data: &Building,
        randomizer: &mut Randomizer,
        info: &CitizenInfo,
    ) -> (Vector3, Vector3);
}

/// Ports passed to patch registration.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use hostpatch::ports::{PatchServices, WeatherQuery};
///
/// struct AlwaysSunny;
///
/// impl WeatherQuery for AlwaysSunny {
///     fn is_bad_weather(&self) -> bool {
///         false
///     }
/// }
///
/// let services = PatchServices::new().with_weather(Arc::new(AlwaysSunny));
/// assert!(services.weather.is_some());
/// assert!(services.construction.is_none());
/// ```
#[derive(Clone, Default)]
pub struct PatchServices {
    /// Construction gating and timing
    pub construction: Option<Arc<dyn ConstructionAuthority>>,
    /// Problem-timer reporting
    pub problems: Option<Arc<dyn ProblemReporter>>,
    /// Weather state
    pub weather: Option<Arc<dyn WeatherQuery>>,
    /// Night lighting
    pub lighting: Option<Arc<dyn LightingPolicy>>,
    /// Active overlay
    pub info_view: Option<Arc<dyn InfoViewQuery>>,
    /// Original spawn-position calculation
    pub spawn: Option<Arc<dyn SpawnPositionCalculator>>,
}

impl PatchServices {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the construction authority.
    #[must_use]
    pub fn with_construction(mut self, port: Arc<dyn ConstructionAuthority>) -> Self {
        self.construction = Some(port);
        self
    }

    /// Sets the problem reporter.
    #[must_use]
    pub fn with_problems(mut self, port: Arc<dyn ProblemReporter>) -> Self {
        self.problems = Some(port);
        self
    }

    /// Sets the weather query.
    #[must_use]
    pub fn with_weather(mut self, port: Arc<dyn WeatherQuery>) -> Self {
        self.weather = Some(port);
        self
    }

    /// Sets the lighting policy.
    #[must_use]
    pub fn with_lighting(mut self, port: Arc<dyn LightingPolicy>) -> Self {
        self.lighting = Some(port);
        self
    }

    /// Sets the overlay query.
    #[must_use]
    pub fn with_info_view(mut self, port: Arc<dyn InfoViewQuery>) -> Self {
        self.info_view = Some(port);
        self
    }

    /// Sets the spawn-position calculator.
    #[must_use]
    pub fn with_spawn(mut self, port: Arc<dyn SpawnPositionCalculator>) -> Self {
        self.spawn = Some(port);
        self
    }
}

impl fmt::Debug for PatchServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchServices")
            .field("construction", &self.construction.is_some())
            .field("problems", &self.problems.is_some())
            .field("weather", &self.weather.is_some())
            .field("lighting", &self.lighting.is_some())
            .field("info_view", &self.info_view.is_some())
            .field("spawn", &self.spawn.is_some())
            .finish()
    }
}
