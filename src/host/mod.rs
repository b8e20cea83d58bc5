//! Host data shapes seen by the building-AI patches.
//!
//! The host's own method bodies are never reimplemented here. This module only
//! describes the values that cross the interception boundary: the building
//! records the hooks read and overwrite, and one argument frame per hooked
//! method. By-reference parameters are fields of the frame; whatever a hook or
//! the original body writes into them is what the caller reads back.

pub mod building;
pub mod frames;
pub mod geometry;

pub use building::{
    BehaviourData, Building, BuildingFlags, BuildingFrame, BuildingInfo, CitizenInfo,
    CitizenInstanceFlags, DoorProp, DoorType, InfoMode, ServiceCategory,
};
pub use frames::{
    CalculateUnspawnPositionArgs, CreateBuildingArgs, GetUpgradeInfoArgs, HandleWorkersArgs,
    ShowConsumptionArgs, SimulationStepActiveArgs,
};
pub use geometry::{Randomizer, Vector2, Vector3};

/// Host type names as they appear in method signatures.
pub mod type_names {
    /// `ushort`
    pub const USHORT: &str = "ushort";
    /// `int`
    pub const INT: &str = "int";
    /// `uint`
    pub const UINT: &str = "uint";
    /// `float`
    pub const FLOAT: &str = "float";
    /// `Building`
    pub const BUILDING: &str = "Building";
    /// `Building.Frame`
    pub const BUILDING_FRAME: &str = "Building.Frame";
    /// `BuildingInfo`
    pub const BUILDING_INFO: &str = "BuildingInfo";
    /// `Citizen.BehaviourData`
    pub const BEHAVIOUR_DATA: &str = "Citizen.BehaviourData";
    /// `CitizenInfo`
    pub const CITIZEN_INFO: &str = "CitizenInfo";
    /// `CitizenInstance.Flags`
    pub const CITIZEN_INSTANCE_FLAGS: &str = "CitizenInstance.Flags";
    /// `Randomizer`
    pub const RANDOMIZER: &str = "Randomizer";
    /// `Vector2`
    pub const VECTOR2: &str = "Vector2";
    /// `Vector3`
    pub const VECTOR3: &str = "Vector3";
}

/// Host declaring types of the hooked methods.
pub mod declaring_types {
    /// Base AI of every building
    pub const BUILDING_AI: &str = "BuildingAI";
    /// AI of zoned (growable) buildings
    pub const PRIVATE_BUILDING_AI: &str = "PrivateBuildingAI";
    /// AI of player-placed service buildings
    pub const PLAYER_BUILDING_AI: &str = "PlayerBuildingAI";
    /// AI of commercial zoned buildings
    pub const COMMERCIAL_BUILDING_AI: &str = "CommercialBuildingAI";
    /// Owner of the building array
    pub const BUILDING_MANAGER: &str = "BuildingManager";
}
