//! Forklift lifecycle states.

use wh_core::Role;

/// Where a forklift is in its pickup/drop-off cycle.
///
/// The "source" is where a unit is picked up and the "destination" where it
/// is put down.  Which of the two is the dock depends on the forklift's
/// [`Role`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ForkliftState {
    #[default]
    Idle,
    GoingToSource,
    Loading,
    GoingToDest,
    Unloading,
    GoingToStandby,
}

impl ForkliftState {
    pub const ALL: [ForkliftState; 6] = [
        ForkliftState::Idle,
        ForkliftState::GoingToSource,
        ForkliftState::Loading,
        ForkliftState::GoingToDest,
        ForkliftState::Unloading,
        ForkliftState::GoingToStandby,
    ];

    /// Role-aware label used in logs and snapshots.
    ///
    /// An unloading forklift goes to the dock first and a rack second; a
    /// loading forklift the other way round.
    pub fn label(self, role: Role) -> &'static str {
        match (self, role) {
            (ForkliftState::Idle, _) => "IDLE",
            (ForkliftState::GoingToSource, Role::Unloading) => "GOING_TO_DOCK",
            (ForkliftState::GoingToSource, Role::Loading) => "GOING_TO_RACK",
            (ForkliftState::Loading, _) => "LOADING",
            (ForkliftState::GoingToDest, Role::Unloading) => "GOING_TO_RACK",
            (ForkliftState::GoingToDest, Role::Loading) => "GOING_TO_DOCK",
            (ForkliftState::Unloading, _) => "UNLOADING",
            (ForkliftState::GoingToStandby, _) => "GOING_TO_STANDBY",
        }
    }

    /// `true` for the three travelling states.
    pub fn is_travelling(self) -> bool {
        matches!(
            self,
            ForkliftState::GoingToSource | ForkliftState::GoingToDest | ForkliftState::GoingToStandby
        )
    }
}
