//! Argument frames of the hooked host methods.
//!
//! Each frame holds one call's parameters in declaration order. Parameters the
//! host passes by reference are read back by the caller after the call, so any
//! change a hook makes to them is observable.

use crate::host::{
    building::{BehaviourData, Building, BuildingFrame, BuildingInfo, CitizenInfo, CitizenInstanceFlags},
    geometry::{Randomizer, Vector2, Vector3},
};

/// `CommercialBuildingAI.SimulationStepActive(ushort, ref Building, ref Building.Frame)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationStepActiveArgs {
    /// Building id
    pub building_id: u16,
    /// By reference
    pub data: Building,
    /// By reference
    pub frame: BuildingFrame,
}

/// `PrivateBuildingAI.HandleWorkers(ushort, ref Building, ref Citizen.BehaviourData,
/// ref int, ref int, ref int)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandleWorkersArgs {
    /// Building id
    pub building_id: u16,
    /// By reference
    pub data: Building,
    /// By reference
    pub behaviour: BehaviourData,
    /// By reference
    pub alive_count: i32,
    /// By reference
    pub total_count: i32,
    /// By reference
    pub worker_count: i32,
}

/// `ShowConsumption(ushort, ref Building)`, declared on both the private and the
/// player building AI.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShowConsumptionArgs {
    /// Building id
    pub building_id: u16,
    /// By reference
    pub data: Building,
}

/// `BuildingAI.CalculateUnspawnPosition(ushort, ref Building, ref Randomizer,
/// CitizenInfo, ushort, ref Vector3, ref Vector3, ref Vector2, ref CitizenInstance.Flags)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculateUnspawnPositionArgs {
    /// Building id
    pub building_id: u16,
    /// By reference
    pub data: Building,
    /// By reference
    pub randomizer: Randomizer,
    /// Citizen being unspawned
    pub info: CitizenInfo,
    /// Citizen instance to ignore during collision checks
    pub ignore_instance: u16,
    /// By reference
    pub position: Vector3,
    /// By reference
    pub target: Vector3,
    /// By reference
    pub direction: Vector2,
    /// By reference
    pub special_flags: CitizenInstanceFlags,
}

/// `PrivateBuildingAI.GetUpgradeInfo(ushort, ref Building)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetUpgradeInfoArgs {
    /// Building id
    pub building_id: u16,
    /// By reference
    pub data: Building,
}

/// `BuildingManager.CreateBuilding(ref ushort, ref Randomizer, BuildingInfo, Vector3,
/// float, int, uint)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateBuildingArgs {
    /// By reference; receives the new building id
    pub building: u16,
    /// By reference
    pub randomizer: Randomizer,
    /// Asset to place
    pub info: BuildingInfo,
    /// World position
    pub position: Vector3,
    /// Rotation
    pub angle: f32,
    /// Lot depth
    pub length: i32,
    /// Build index
    pub build_index: u32,
}
