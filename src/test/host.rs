use std::sync::{
    atomic::{AtomicU16, Ordering},
    Arc,
};

use dashmap::DashMap;

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
        Building, BuildingFlags, BuildingInfo, CalculateUnspawnPositionArgs,
        CitizenInstanceFlags, CreateBuildingArgs, GetUpgradeInfoArgs, HandleWorkersArgs,
        ShowConsumptionArgs, SimulationStepActiveArgs, Vector3,
    },
    interception::MethodSite,
    metadata::{
        handle::MethodHandle,
        signature::ParameterDescriptor,
        table::{MethodDef, MethodTable},
    },
};

fn value(type_name: &str) -> ParameterDescriptor {
    ParameterDescriptor::value(type_name)
}

fn by_ref(type_name: &str) -> ParameterDescriptor {
    ParameterDescriptor::by_ref(type_name)
}

/// Host method table with the hooked building-AI methods defined.
///
/// Methods are looked up by `Type.Method` name, the same names the patches use.
pub struct FakeHost {
    pub table: Arc<MethodTable>,
    handles: DashMap<&'static str, MethodHandle>,
    calls: Arc<DashMap<&'static str, usize>>,
}

impl FakeHost {
    /// Construction time the unpatched host reports.
    pub const CONSTRUCTION_TIME: i32 = 1000;

    pub fn new() -> Self {
        Self::build(None)
    }

    /// A host that lacks the method `name`.
    pub fn without(name: &str) -> Self {
        Self::build(Some(name))
    }

    pub fn handle(&self, name: &str) -> MethodHandle {
        *self
            .handles
            .get(name)
            .unwrap_or_else(|| panic!("host method {name} not defined"))
    }

    pub fn site<A: 'static, R: 'static>(&self, name: &str) -> Arc<MethodSite<A, R>> {
        self.table.site::<A, R>(self.handle(name)).unwrap()
    }

    /// Number of times the original body of `name` ran.
    pub fn original_calls(&self, name: &str) -> usize {
        self.calls.get(name).map_or(0, |count| *count)
    }

    fn define<A, R, F>(&self, skip: Option<&str>, name: &'static str, def: MethodDef, body: F)
    where
        A: 'static,
        R: 'static,
        F: Fn(&mut A) -> R + Send + Sync + 'static,
    {
        if skip == Some(name) {
            return;
        }
        let calls = self.calls.clone();
        let handle = self
            .table
            .define(def, move |args: &mut A| {
                *calls.entry(name).or_insert(0) += 1;
                body(args)
            })
            .unwrap();
        self.handles.insert(name, handle);
    }

    fn build(skip: Option<&str>) -> Self {
        let host = FakeHost {
            table: Arc::new(MethodTable::new()),
            handles: DashMap::new(),
            calls: Arc::new(DashMap::new()),
        };

        host.define(
            skip,
            "CommercialBuildingAI.SimulationStepActive",
            MethodDef::new(COMMERCIAL_BUILDING_AI, "SimulationStepActive")
                .non_public()
                .param(value(USHORT))
                .param(by_ref(BUILDING))
                .param(by_ref(BUILDING_FRAME)),
            |args: &mut SimulationStepActiveArgs| {
                if args.frame.productivity_state > 0 {
                    args.data.outgoing_problem_timer = 0;
                }
            },
        );

        host.define(
            skip,
            "PrivateBuildingAI.HandleWorkers",
            MethodDef::new(PRIVATE_BUILDING_AI, "HandleWorkers")
                .non_public()
                .param(value(USHORT))
                .param(by_ref(BUILDING))
                .param(by_ref(BEHAVIOUR_DATA))
                .param(by_ref(INT))
                .param(by_ref(INT))
                .param(by_ref(INT)),
            |args: &mut HandleWorkersArgs| {
                args.total_count = args.alive_count;
                if args.alive_count < args.worker_count {
                    args.data.worker_problem_timer = args.data.worker_problem_timer.saturating_add(1);
                } else {
                    args.data.worker_problem_timer = 0;
                }
            },
        );

        host.define(
            skip,
            "PrivateBuildingAI.GetConstructionTime",
            MethodDef::new(PRIVATE_BUILDING_AI, "GetConstructionTime")
                .non_public()
                .returns(INT),
            |_: &mut ()| Self::CONSTRUCTION_TIME,
        );

        for (declaring_type, name) in [
            (PRIVATE_BUILDING_AI, "PrivateBuildingAI.ShowConsumption"),
            (PLAYER_BUILDING_AI, "PlayerBuildingAI.ShowConsumption"),
        ] {
            host.define(
                skip,
                name,
                MethodDef::new(declaring_type, "ShowConsumption")
                    .non_public()
                    .param(value(USHORT))
                    .param(by_ref(BUILDING))
                    .returns("bool"),
                |args: &mut ShowConsumptionArgs| {
                    !args.data.flags.contains(BuildingFlags::ABANDONED)
                },
            );
        }

        // Overload that differs only by passing mode
        host.define(
            skip,
            "PrivateBuildingAI.ShowConsumption(value)",
            MethodDef::new(PRIVATE_BUILDING_AI, "ShowConsumption")
                .non_public()
                .param(value(USHORT))
                .param(value(BUILDING))
                .returns("bool"),
            |args: &mut (u16, Building)| !args.1.flags.contains(BuildingFlags::ABANDONED),
        );

        host.define(
            skip,
            "BuildingAI.CalculateUnspawnPosition",
            MethodDef::new(BUILDING_AI, "CalculateUnspawnPosition")
                .param(value(USHORT))
                .param(by_ref(BUILDING))
                .param(by_ref(RANDOMIZER))
                .param(value(CITIZEN_INFO))
                .param(value(USHORT))
                .param(by_ref(VECTOR3))
                .param(by_ref(VECTOR3))
                .param(by_ref(VECTOR2))
                .param(by_ref(CITIZEN_INSTANCE_FLAGS)),
            |args: &mut CalculateUnspawnPositionArgs| {
                let offset = args.randomizer.int32(4) as f32;
                args.position = Vector3::new(1.0 + offset, 0.0, 1.0);
                args.target = Vector3::new(2.0 + offset, 0.0, 2.0);
                args.special_flags |= CitizenInstanceFlags::HANG_AROUND;
            },
        );

        host.define(
            skip,
            "PrivateBuildingAI.GetUpgradeInfo",
            MethodDef::new(PRIVATE_BUILDING_AI, "GetUpgradeInfo")
                .param(value(USHORT))
                .param(by_ref(BUILDING))
                .returns(BUILDING_INFO),
            |args: &mut GetUpgradeInfoArgs| {
                args.data
                    .info
                    .as_ref()
                    .map(|info| BuildingInfo::new(format!("{} L2", info.name), info.service))
            },
        );

        let next_building = AtomicU16::new(1);
        host.define(
            skip,
            "BuildingManager.CreateBuilding",
            MethodDef::new(BUILDING_MANAGER, "CreateBuilding")
                .param(by_ref(USHORT))
                .param(by_ref(RANDOMIZER))
                .param(value(BUILDING_INFO))
                .param(value(VECTOR3))
                .param(value(FLOAT))
                .param(value(INT))
                .param(value(UINT))
                .returns("bool"),
            move |args: &mut CreateBuildingArgs| {
                args.building = next_building.fetch_add(1, Ordering::SeqCst);
                args.randomizer.int32(100);
                true
            },
        );

        host
    }
}
