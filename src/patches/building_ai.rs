//! Hooks around the host's building AI.
//!
//! Every patch wraps one host method and calls into the [`ports`](crate::ports)
//! for its decisions. A patch whose port is missing leaves the host behavior
//! untouched.
//!
//! | Patch | Host method | Kind |
//! |-------|-------------|------|
//! | [`SimulationStepActivePatch`] | `CommercialBuildingAI.SimulationStepActive` | observe + mutate |
//! | [`HandleWorkersPatch`] | `PrivateBuildingAI.HandleWorkers` | observe |
//! | [`ConstructionTimePatch`] | `PrivateBuildingAI.GetConstructionTime` | replace |
//! | [`ShowConsumptionPatch`] | `PrivateBuildingAI.ShowConsumption`, `PlayerBuildingAI.ShowConsumption` | suppress |
//! | [`UnspawnPositionPatch`] | `BuildingAI.CalculateUnspawnPosition` | post-process |
//! | [`UpgradeInfoPatch`] | `PrivateBuildingAI.GetUpgradeInfo` | suppress |
//! | [`CreateBuildingPatch`] | `BuildingManager.CreateBuilding` | suppress + observe |

use std::sync::Arc;

use crate::{
    host::{
        declaring_types::{
            BUILDING_AI, BUILDING_MANAGER, COMMERCIAL_BUILDING_AI, PLAYER_BUILDING_AI,
            PRIVATE_BUILDING_AI,
        },
        type_names::{
            BEHAVIOUR_DATA, BUILDING, BUILDING_FRAME, BUILDING_INFO, CITIZEN_INFO,
            CITIZEN_INSTANCE_FLAGS, FLOAT, INT, RANDOMIZER, UINT, USHORT, VECTOR2, VECTOR3,
        },
        BuildingFlags, BuildingInfo, CalculateUnspawnPositionArgs, CitizenInstanceFlags,
        CreateBuildingArgs, GetUpgradeInfoArgs, HandleWorkersArgs, InfoMode,
        ShowConsumptionArgs, SimulationStepActiveArgs,
    },
    interception::{Hook, HookRecord, Patch, PatchRegistry},
    metadata::signature::{BindingFlags, MethodSignature},
    patches::BuildingPatchConfig,
    ports::{
        ConstructionAuthority, InfoViewQuery, LightingPolicy, PatchServices, ProblemReporter,
        SpawnPositionCalculator, WeatherQuery,
    },
    Result,
};

const NON_PUBLIC_INSTANCE: BindingFlags = BindingFlags::INSTANCE.union(BindingFlags::NON_PUBLIC);
const PUBLIC_INSTANCE: BindingFlags = BindingFlags::INSTANCE.union(BindingFlags::PUBLIC);

/// Reports outgoing-goods problems of commercial buildings and spoils one unit
/// of stock per step.
///
/// The stock never reaches the full state, in which the host stops sending
/// visitors.
pub struct SimulationStepActivePatch {
    problems: Option<Arc<dyn ProblemReporter>>,
}

impl SimulationStepActivePatch {
    /// Patch name.
    pub const NAME: &'static str = "CommercialBuildingAI.SimulationStepActive";

    /// Creates the patch.
    #[must_use]
    pub fn new(services: &PatchServices) -> Self {
        SimulationStepActivePatch {
            problems: services.problems.clone(),
        }
    }

    /// `SimulationStepActive(ushort, ref Building, ref Building.Frame)`
    #[must_use]
    pub fn signature() -> MethodSignature {
        MethodSignature::builder(COMMERCIAL_BUILDING_AI, "SimulationStepActive")
            .flags(NON_PUBLIC_INSTANCE)
            .param(USHORT)
            .by_ref(BUILDING)
            .by_ref(BUILDING_FRAME)
            .build()
    }
}

impl Patch for SimulationStepActivePatch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let problems = self.problems.clone();
        let hook = Hook::<SimulationStepActiveArgs, (), u8>::new(Self::NAME)
            .before(|ctx| {
                ctx.state = ctx.args.data.outgoing_problem_timer;
                if ctx.args.data.custom_buffer2 > 0 {
                    ctx.args.data.custom_buffer2 -= 1;
                }
                Ok(())
            })
            .after(move |ctx| {
                if ctx.state != ctx.args.data.outgoing_problem_timer {
                    if let Some(problems) = &problems {
                        problems.process_building_problems(ctx.args.building_id, ctx.state);
                    }
                }
                Ok(())
            });
        registry.register(&Self::signature(), hook)
    }
}

/// Reports worker-problem transitions of zoned buildings.
pub struct HandleWorkersPatch {
    problems: Option<Arc<dyn ProblemReporter>>,
}

impl HandleWorkersPatch {
    /// Patch name.
    pub const NAME: &'static str = "PrivateBuildingAI.HandleWorkers";

    /// Creates the patch.
    #[must_use]
    pub fn new(services: &PatchServices) -> Self {
        HandleWorkersPatch {
            problems: services.problems.clone(),
        }
    }

    /// `HandleWorkers(ushort, ref Building, ref Citizen.BehaviourData, ref int,
    /// ref int, ref int)`
    #[must_use]
    pub fn signature() -> MethodSignature {
        MethodSignature::builder(PRIVATE_BUILDING_AI, "HandleWorkers")
            .flags(NON_PUBLIC_INSTANCE)
            .param(USHORT)
            .by_ref(BUILDING)
            .by_ref(BEHAVIOUR_DATA)
            .by_ref(INT)
            .by_ref(INT)
            .by_ref(INT)
            .build()
    }
}

impl Patch for HandleWorkersPatch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let problems = self.problems.clone();
        let hook = Hook::<HandleWorkersArgs, (), u8>::new(Self::NAME)
            .before(|ctx| {
                ctx.state = ctx.args.data.worker_problem_timer;
                Ok(())
            })
            .after(move |ctx| {
                if ctx.state != ctx.args.data.worker_problem_timer {
                    if let Some(problems) = &problems {
                        problems.process_worker_problems(ctx.args.building_id, ctx.state);
                    }
                }
                Ok(())
            });
        registry.register(&Self::signature(), hook)
    }
}

/// Replaces the construction time of zoned buildings.
///
/// The original body never runs; without an authority the time is `0`.
pub struct ConstructionTimePatch {
    construction: Option<Arc<dyn ConstructionAuthority>>,
}

impl ConstructionTimePatch {
    /// Patch name.
    pub const NAME: &'static str = "PrivateBuildingAI.GetConstructionTime";

    /// Creates the patch.
    #[must_use]
    pub fn new(services: &PatchServices) -> Self {
        ConstructionTimePatch {
            construction: services.construction.clone(),
        }
    }

    /// `GetConstructionTime()`
    #[must_use]
    pub fn signature() -> MethodSignature {
        MethodSignature::builder(PRIVATE_BUILDING_AI, "GetConstructionTime")
            .flags(NON_PUBLIC_INSTANCE)
            .build()
    }
}

impl Patch for ConstructionTimePatch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let construction = self.construction.clone();
        let hook = Hook::<(), i32>::new(Self::NAME).before(move |ctx| {
            let time = construction
                .as_ref()
                .map_or(0, |authority| authority.construction_time());
            ctx.skip_with(time);
            Ok(())
        });
        registry.register(&Self::signature(), hook)
    }
}

/// Hides the consumption glow of buildings whose lights are off.
///
/// Active overlays always show consumption. The same hook is applied to the
/// private and the player building AI.
pub struct ShowConsumptionPatch {
    name: &'static str,
    declaring_type: &'static str,
    info_view: Option<Arc<dyn InfoViewQuery>>,
    lighting: Option<Arc<dyn LightingPolicy>>,
}

impl ShowConsumptionPatch {
    /// Patch for `PrivateBuildingAI.ShowConsumption`.
    #[must_use]
    pub fn private(services: &PatchServices) -> Self {
        Self::with_target("PrivateBuildingAI.ShowConsumption", PRIVATE_BUILDING_AI, services)
    }

    /// Patch for `PlayerBuildingAI.ShowConsumption`.
    #[must_use]
    pub fn player(services: &PatchServices) -> Self {
        Self::with_target("PlayerBuildingAI.ShowConsumption", PLAYER_BUILDING_AI, services)
    }

    fn with_target(
        name: &'static str,
        declaring_type: &'static str,
        services: &PatchServices,
    ) -> Self {
        ShowConsumptionPatch {
            name,
            declaring_type,
            info_view: services.info_view.clone(),
            lighting: services.lighting.clone(),
        }
    }

    /// `ShowConsumption(ushort, ref Building)` on this patch's declaring type.
    #[must_use]
    pub fn signature(&self) -> MethodSignature {
        MethodSignature::builder(self.declaring_type, "ShowConsumption")
            .flags(NON_PUBLIC_INSTANCE)
            .param(USHORT)
            .by_ref(BUILDING)
            .build()
    }
}

impl Patch for ShowConsumptionPatch {
    fn name(&self) -> &str {
        self.name
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let info_view = self.info_view.clone();
        let lighting = self.lighting.clone();
        let hook = Hook::<ShowConsumptionArgs, bool>::new(self.name).before(move |ctx| {
            let mode = info_view
                .as_ref()
                .map_or(InfoMode::None, |view| view.current_mode());
            if mode != InfoMode::None {
                return Ok(());
            }

            let lights_off = lighting.as_ref().is_some_and(|policy| {
                policy.should_switch_building_lights_off(ctx.args.building_id)
            });
            if lights_off {
                ctx.skip_with(false);
            }
            Ok(())
        });
        registry.register(&self.signature(), hook)
    }
}

/// Moves unspawning citizens to the building door in bad weather, so they go
/// inside instead of loitering in front of it.
pub struct UnspawnPositionPatch {
    weather: Option<Arc<dyn WeatherQuery>>,
    spawn: Option<Arc<dyn SpawnPositionCalculator>>,
}

impl UnspawnPositionPatch {
    /// Patch name.
    pub const NAME: &'static str = "BuildingAI.CalculateUnspawnPosition";

    /// Creates the patch.
    #[must_use]
    pub fn new(services: &PatchServices) -> Self {
        UnspawnPositionPatch {
            weather: services.weather.clone(),
            spawn: services.spawn.clone(),
        }
    }

    /// `CalculateUnspawnPosition(ushort, ref Building, ref Randomizer, CitizenInfo,
    /// ushort, ref Vector3, ref Vector3, ref Vector2, ref CitizenInstance.Flags)`
    #[must_use]
    pub fn signature() -> MethodSignature {
        MethodSignature::builder(BUILDING_AI, "CalculateUnspawnPosition")
            .flags(PUBLIC_INSTANCE)
            .param(USHORT)
            .by_ref(BUILDING)
            .by_ref(RANDOMIZER)
            .param(CITIZEN_INFO)
            .param(USHORT)
            .by_ref(VECTOR3)
            .by_ref(VECTOR3)
            .by_ref(VECTOR2)
            .by_ref(CITIZEN_INSTANCE_FLAGS)
            .build()
    }
}

impl Patch for UnspawnPositionPatch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let weather = self.weather.clone();
        let spawn = self.spawn.clone();
        let hook = Hook::<CalculateUnspawnPositionArgs, ()>::new(Self::NAME).after(move |ctx| {
            let (Some(weather), Some(spawn)) = (&weather, &spawn) else {
                return Ok(());
            };
            if !weather.is_bad_weather() {
                return Ok(());
            }

            let args = &mut *ctx.args;
            if !args
                .data
                .info
                .as_ref()
                .is_some_and(BuildingInfo::has_enter_door)
            {
                return Ok(());
            }

            let (position, target) = spawn.calculate_spawn_position(
                args.building_id,
                &args.data,
                &mut args.randomizer,
                &args.info,
            );
            args.position = position;
            args.target = target;
            args.special_flags
                .remove(CitizenInstanceFlags::HANG_AROUND | CitizenInstanceFlags::SITTING_DOWN);
            Ok(())
        });
        registry.register(&Self::signature(), hook)
    }
}

/// Withholds level-up targets while the construction authority refuses
/// upgrades for the building's service.
pub struct UpgradeInfoPatch {
    construction: Option<Arc<dyn ConstructionAuthority>>,
}

impl UpgradeInfoPatch {
    /// Patch name.
    pub const NAME: &'static str = "PrivateBuildingAI.GetUpgradeInfo";

    /// Creates the patch.
    #[must_use]
    pub fn new(services: &PatchServices) -> Self {
        UpgradeInfoPatch {
            construction: services.construction.clone(),
        }
    }

    /// `GetUpgradeInfo(ushort, ref Building)`
    #[must_use]
    pub fn signature() -> MethodSignature {
        MethodSignature::builder(PRIVATE_BUILDING_AI, "GetUpgradeInfo")
            .flags(PUBLIC_INSTANCE)
            .param(USHORT)
            .by_ref(BUILDING)
            .build()
    }
}

impl Patch for UpgradeInfoPatch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let construction = self.construction.clone();
        let hook =
            Hook::<GetUpgradeInfoArgs, Option<BuildingInfo>>::new(Self::NAME).before(move |ctx| {
                let Some(authority) = &construction else {
                    return Ok(());
                };
                // An upgrade that already started always completes
                if ctx.args.data.flags.contains(BuildingFlags::UPGRADING) {
                    return Ok(());
                }

                let service = ctx
                    .args
                    .data
                    .info
                    .as_ref()
                    .map(|info| info.service)
                    .unwrap_or_default();
                if !authority.can_build_or_upgrade(service, Some(ctx.args.building_id)) {
                    ctx.skip_with(None);
                }
                Ok(())
            });
        registry.register(&Self::signature(), hook)
    }
}

/// Refuses new buildings the construction authority does not allow, and
/// registers the ones that were created.
pub struct CreateBuildingPatch {
    construction: Option<Arc<dyn ConstructionAuthority>>,
}

impl CreateBuildingPatch {
    /// Patch name.
    pub const NAME: &'static str = "BuildingManager.CreateBuilding";

    /// Creates the patch.
    #[must_use]
    pub fn new(services: &PatchServices) -> Self {
        CreateBuildingPatch {
            construction: services.construction.clone(),
        }
    }

    /// `CreateBuilding(ref ushort, ref Randomizer, BuildingInfo, Vector3, float,
    /// int, uint)`
    #[must_use]
    pub fn signature() -> MethodSignature {
        MethodSignature::builder(BUILDING_MANAGER, "CreateBuilding")
            .flags(PUBLIC_INSTANCE)
            .by_ref(USHORT)
            .by_ref(RANDOMIZER)
            .param(BUILDING_INFO)
            .param(VECTOR3)
            .param(FLOAT)
            .param(INT)
            .param(UINT)
            .build()
    }
}

impl Patch for CreateBuildingPatch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
        let gate = self.construction.clone();
        let tracker = self.construction.clone();
        let hook = Hook::<CreateBuildingArgs, bool>::new(Self::NAME)
            .before(move |ctx| {
                if let Some(authority) = &gate {
                    if !authority.can_build_or_upgrade(ctx.args.info.service, None) {
                        ctx.skip_with(false);
                    }
                }
                Ok(())
            })
            .after(move |ctx| {
                if ctx.result == Some(true) {
                    if let Some(authority) = &tracker {
                        authority.register_constructing_building(
                            ctx.args.building,
                            ctx.args.info.service,
                        );
                    }
                }
                Ok(())
            });
        registry.register(&Self::signature(), hook)
    }
}

/// Builds the patches `config` enables, wired to `services`.
///
/// Patches are returned in registration order.
#[must_use]
pub fn building_patches(
    services: &PatchServices,
    config: &BuildingPatchConfig,
) -> Vec<Box<dyn Patch>> {
    let mut patches: Vec<Box<dyn Patch>> = Vec::with_capacity(config.enabled_count());

    if config.problem_timers {
        patches.push(Box::new(SimulationStepActivePatch::new(services)));
        patches.push(Box::new(HandleWorkersPatch::new(services)));
    }
    if config.construction_time {
        patches.push(Box::new(ConstructionTimePatch::new(services)));
    }
    if config.lights {
        patches.push(Box::new(ShowConsumptionPatch::private(services)));
        patches.push(Box::new(ShowConsumptionPatch::player(services)));
    }
    if config.weather_doors {
        patches.push(Box::new(UnspawnPositionPatch::new(services)));
    }
    if config.construction_gating {
        patches.push(Box::new(UpgradeInfoPatch::new(services)));
        patches.push(Box::new(CreateBuildingPatch::new(services)));
    }

    patches
}
