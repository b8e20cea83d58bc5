//! Building records and related host enums.

use bitflags::bitflags;
use strum::{Display, EnumString};

/// Service a building belongs to; construction decisions are made per service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ServiceCategory {
    /// No service
    #[default]
    None,
    /// Residential zone
    Residential,
    /// Commercial zone
    Commercial,
    /// Industrial zone
    Industrial,
    /// Office zone
    Office,
    /// Power plants
    Electricity,
    /// Water and sewage
    Water,
    /// Parks and plazas
    Beautification,
    /// Garbage collection
    Garbage,
    /// Clinics and hospitals
    HealthCare,
    /// Police
    PoliceDepartment,
    /// Schools
    Education,
    /// Unique buildings
    Monument,
    /// Fire stations
    FireDepartment,
    /// Stations and depots
    PublicTransport,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Building state flags
    pub struct BuildingFlags: u32 {
        /// Slot is in use
        const CREATED = 0x0000_0001;
        /// Construction finished
        const COMPLETED = 0x0000_0004;
        /// Currently upgrading to the next level
        const UPGRADING = 0x0000_0080;
        /// Abandoned
        const ABANDONED = 0x0000_4000;
        /// Receiving power and water
        const ACTIVE = 0x0000_0800;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    /// Citizen instance behavior flags
    pub struct CitizenInstanceFlags: u32 {
        /// Loiters near the target after arriving
        const HANG_AROUND = 0x0000_0800;
        /// Sits down after arriving
        const SITTING_DOWN = 0x0000_4000;
        /// Target is inside the building
        const ENTER_VEHICLE = 0x0000_0010;
        /// Spawned underground
        const UNDERGROUND = 0x0000_0200;
    }
}

/// Which way a door prop can be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum DoorType {
    /// Not a door
    None,
    /// Entry only
    Enter,
    /// Exit only
    Exit,
    /// Entry and exit
    Both,
}

impl DoorType {
    /// Returns `true` if citizens can walk in through this door.
    #[must_use]
    pub fn allows_entry(&self) -> bool {
        matches!(self, DoorType::Enter | DoorType::Both)
    }
}

/// One entry of a building's door list; the prop may be missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorProp {
    /// Door type of the resolved prop, `None` if the prop failed to load
    pub final_prop: Option<DoorType>,
}

/// Shared description of a building asset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildingInfo {
    /// Asset name
    pub name: String,
    /// Service category
    pub service: ServiceCategory,
    /// Enter doors, `None` if the asset defines none
    pub enter_doors: Option<Vec<DoorProp>>,
}

impl BuildingInfo {
    /// Creates an asset description without doors.
    pub fn new(name: impl Into<String>, service: ServiceCategory) -> Self {
        BuildingInfo {
            name: name.into(),
            service,
            enter_doors: None,
        }
    }

    /// Sets the door list.
    #[must_use]
    pub fn with_doors(mut self, doors: Vec<DoorProp>) -> Self {
        self.enter_doors = Some(doors);
        self
    }

    /// Returns `true` if any loaded door prop admits citizens.
    #[must_use]
    pub fn has_enter_door(&self) -> bool {
        self.enter_doors.as_ref().is_some_and(|doors| {
            doors
                .iter()
                .filter_map(|door| door.final_prop)
                .any(|door| door.allows_entry())
        })
    }
}

/// A building record. Hooks receive it by reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Building {
    /// State flags
    pub flags: BuildingFlags,
    /// Asset description, `None` while the asset is not loaded
    pub info: Option<BuildingInfo>,
    /// Counts up while goods cannot be delivered
    pub outgoing_problem_timer: u8,
    /// Counts up while the building lacks workers
    pub worker_problem_timer: u8,
    /// Stock of goods for commercial buildings
    pub custom_buffer2: u16,
}

/// Per-frame building snapshot passed alongside the record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildingFrame {
    /// Fire intensity
    pub fire_damage_state: u8,
    /// Production rate
    pub productivity_state: u8,
}

/// Worker and visitor counters accumulated during a simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BehaviourData {
    /// Workers with an education level
    pub education_count: i32,
    /// Workers that are sick
    pub sick_count: i32,
}

/// Description of the citizen being spawned or unspawned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CitizenInfo {
    /// Asset name
    pub name: String,
}

/// Active overlay of the host UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
pub enum InfoMode {
    /// Normal view
    #[default]
    None,
    /// Power grid overlay
    Electricity,
    /// Water overlay
    Water,
    /// Traffic overlay
    Traffic,
    /// Building levels overlay
    Levels,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_door_detection() {
        let none = BuildingInfo::new("shop", ServiceCategory::Commercial);
        assert!(!none.has_enter_door());

        let exit_only = none.clone().with_doors(vec![
            DoorProp { final_prop: None },
            DoorProp {
                final_prop: Some(DoorType::Exit),
            },
        ]);
        assert!(!exit_only.has_enter_door());

        let both = none.with_doors(vec![
            DoorProp { final_prop: None },
            DoorProp {
                final_prop: Some(DoorType::Both),
            },
        ]);
        assert!(both.has_enter_door());
    }

    #[test]
    fn test_service_category_names() {
        assert_eq!(ServiceCategory::HealthCare.to_string(), "HealthCare");
        assert_eq!(
            "Commercial".parse::<ServiceCategory>().unwrap(),
            ServiceCategory::Commercial
        );
    }
}
