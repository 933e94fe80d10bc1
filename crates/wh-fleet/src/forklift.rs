//! The forklift agent.
//!
//! A forklift is stepped once per tick by the model.  One step does one
//! thing: discover work, move one cell, pick a unit up or put one down.
//! Every failure is rolled back inside the step that hit it, so a step
//! never returns an error.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use wh_core::{AgentRng, Cell, Color, DockId, ForkliftId, RackId, Role};
use wh_inventory::{CompletedOrder, Inventory, LedgerClaim, SpaceClaim, StockClaim};

use crate::{FleetContext, FleetError, FleetResult, ForkliftState, StepEvent};

// ── Job bookkeeping ───────────────────────────────────────────────────────────

/// Claim backing the pickup half of a job.
#[derive(Debug)]
enum PickupClaim {
    /// Unloading: a unit of the inbound order.
    Ledger(LedgerClaim),
    /// Loading: a unit on a rack.
    Stock(StockClaim),
}

/// Claim backing the drop-off half of a job.
#[derive(Debug)]
enum DropoffClaim {
    /// Unloading: a free slot on a rack.
    Space(SpaceClaim),
    /// Loading: a unit of the outbound order.
    Ledger(LedgerClaim),
}

#[derive(Debug)]
struct Job {
    dock:    DockId,
    seq:     u64,
    color:   Color,
    /// Rack on the other end of the job.
    rack:    RackId,
    dest:    Cell,
    /// `None` once the unit is on the forks.
    pickup:  Option<PickupClaim>,
    /// `None` only while an unloading forklift waits for a new slot.
    dropoff: Option<DropoffClaim>,
}

fn release_pickup(inventory: &mut Inventory, claim: PickupClaim) {
    match claim {
        PickupClaim::Ledger(c) => inventory.dock_mut(c.dock()).release(c),
        PickupClaim::Stock(c) => inventory.release_stock(c),
    }
}

fn release_dropoff(inventory: &mut Inventory, claim: DropoffClaim) {
    match claim {
        DropoffClaim::Space(c) => inventory.release_space(c),
        DropoffClaim::Ledger(c) => inventory.dock_mut(c.dock()).release(c),
    }
}

// ── ForkLift ──────────────────────────────────────────────────────────────────

/// A single forklift bound to one [`Role`].
#[derive(Debug)]
pub struct ForkLift {
    id:       ForkliftId,
    role:     Role,
    position: Cell,
    standby:  Cell,
    state:    ForkliftState,
    /// Cells still to be entered, one per tick.
    path:     VecDeque<Cell>,
    target:   Option<Cell>,
    job:      Option<Job>,
}

impl ForkLift {
    /// A forklift parked idle on its standby cell.
    pub fn new(id: ForkliftId, role: Role, standby: Cell) -> Self {
        Self {
            id,
            role,
            position: standby,
            standby,
            state: ForkliftState::Idle,
            path: VecDeque::new(),
            target: None,
            job: None,
        }
    }

    pub fn id(&self) -> ForkliftId { self.id }
    pub fn role(&self) -> Role { self.role }
    pub fn position(&self) -> Cell { self.position }
    pub fn standby(&self) -> Cell { self.standby }
    pub fn state(&self) -> ForkliftState { self.state }

    /// Cell the forklift is currently routing to, if any.
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Dock whose order the current job serves.
    pub fn bound_dock(&self) -> Option<DockId> {
        self.job.as_ref().map(|j| j.dock)
    }

    pub fn bound_color(&self) -> Option<Color> {
        self.job.as_ref().map(|j| j.color)
    }

    /// 1 while a unit is on the forks, else 0.
    pub fn carried_units(&self) -> u8 {
        match &self.job {
            Some(job) if job.pickup.is_none() => 1,
            _ => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.state.label(self.role)
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance the forklift by one tick.
    pub fn step(&mut self, ctx: &mut FleetContext<'_>, rng: &mut AgentRng) -> StepEvent {
        let event = match self.state {
            ForkliftState::Idle => self.discover(ctx, rng),
            ForkliftState::GoingToSource => self.advance(ForkliftState::Loading),
            ForkliftState::GoingToDest => self.advance(ForkliftState::Unloading),
            ForkliftState::GoingToStandby => self.advance(ForkliftState::Idle),
            ForkliftState::Loading => self.pick_up(ctx),
            ForkliftState::Unloading => self.put_down(ctx),
        };
        trace!(forklift = %self.id, state = self.label(), ?event, "step");
        event
    }

    /// Pop one cell off the path; switch to `next` once it is empty.
    fn advance(&mut self, next: ForkliftState) -> StepEvent {
        match self.path.pop_front() {
            Some(cell) => {
                self.position = cell;
                if self.path.is_empty() {
                    self.arrive(next);
                }
                StepEvent::Moved { to: cell }
            }
            None => {
                self.arrive(next);
                StepEvent::Arrived { at: self.position }
            }
        }
    }

    fn arrive(&mut self, next: ForkliftState) {
        self.state = next;
        self.target = None;
    }

    /// Compute a path to the access cell of `site` and store it.
    fn route_to_site(&mut self, ctx: &FleetContext<'_>, site: Cell) -> FleetResult<()> {
        let access = ctx.layout.access_cell(site).ok_or(FleetError::NoAccess(site))?;
        self.route_to(ctx, access)
    }

    fn route_to(&mut self, ctx: &FleetContext<'_>, cell: Cell) -> FleetResult<()> {
        let path = ctx.path_finder.route(ctx.layout, self.position, cell)?;
        self.path = path.into_steps();
        self.target = Some(cell);
        Ok(())
    }

    fn go_idle(&mut self) {
        self.state = ForkliftState::Idle;
        self.path.clear();
        self.target = None;
        self.job = None;
    }

    /// Head for the standby cell; stay idle if already there or unreachable.
    fn head_to_standby(&mut self, ctx: &FleetContext<'_>) {
        self.go_idle();
        if self.position == self.standby {
            return;
        }
        match self.route_to(ctx, self.standby) {
            Ok(()) => self.state = ForkliftState::GoingToStandby,
            Err(e) => debug!(forklift = %self.id, error = %e, "standby unreachable, staying put"),
        }
    }

    // ── Idle: work discovery ──────────────────────────────────────────────

    /// Scan this role's docks in order and claim one unit of work at the
    /// first dock that still has unclaimed units.
    fn discover(&mut self, ctx: &mut FleetContext<'_>, rng: &mut AgentRng) -> StepEvent {
        let found = ctx
            .inventory
            .docks_for(self.role)
            .find_map(|d| {
                let colors = d.reservable_colors();
                (!colors.is_empty()).then(|| (d.id(), d.cell(), colors))
            });
        let Some((dock_id, dock_cell, colors)) = found else {
            if self.position == self.standby {
                return StepEvent::Waiting;
            }
            self.head_to_standby(ctx);
            return StepEvent::NoWork;
        };
        let Some(&color) = rng.choose(&colors) else {
            return StepEvent::Waiting;
        };

        let dock = ctx.inventory.dock_mut(dock_id);
        let Some(ledger) = dock.try_reserve(color) else {
            return StepEvent::Waiting;
        };
        let seq = ledger.order_seq();

        // Second claim: the rack on the other end of the transfer.
        let (pickup, dropoff, rack) = match self.role {
            Role::Unloading => match ctx.inventory.reserve_space(color) {
                Some(space) => {
                    let rack = space.rack();
                    (PickupClaim::Ledger(ledger), DropoffClaim::Space(space), rack)
                }
                None => {
                    ctx.inventory.dock_mut(dock_id).release(ledger);
                    return self.roll_back(ctx, dock_id, color, FleetError::NoRack { color, what: "space" });
                }
            },
            Role::Loading => match ctx.inventory.reserve_stock(color) {
                Some(stock) => {
                    let rack = stock.rack();
                    (PickupClaim::Stock(stock), DropoffClaim::Ledger(ledger), rack)
                }
                None => {
                    ctx.inventory.dock_mut(dock_id).release(ledger);
                    return self.roll_back(ctx, dock_id, color, FleetError::NoRack { color, what: "stock" });
                }
            },
        };

        let rack_cell = ctx.inventory.rack(rack).cell();
        let (source, dest) = match self.role {
            Role::Unloading => (dock_cell, rack_cell),
            Role::Loading => (rack_cell, dock_cell),
        };

        // The carrying leg is checked up front so an unreachable
        // destination never costs a pickup.
        let routed = match Self::check_leg(ctx, source, dest) {
            Ok(()) => self.route_to_site(ctx, source),
            Err(e) => Err(e),
        };
        if let Err(e) = routed {
            release_pickup(ctx.inventory, pickup);
            release_dropoff(ctx.inventory, dropoff);
            return self.roll_back(ctx, dock_id, color, e);
        }

        debug!(forklift = %self.id, dock = %dock_id, %color, %rack, "claimed unit");
        self.job = Some(Job {
            dock: dock_id,
            seq,
            color,
            rack,
            dest,
            pickup: Some(pickup),
            dropoff: Some(dropoff),
        });
        self.state = ForkliftState::GoingToSource;
        StepEvent::Claimed { dock: dock_id, color }
    }

    /// Fail unless a unit picked up at `source` can be carried to `dest`.
    fn check_leg(ctx: &FleetContext<'_>, source: Cell, dest: Cell) -> FleetResult<()> {
        let from = ctx.layout.access_cell(source).ok_or(FleetError::NoAccess(source))?;
        let to = ctx.layout.access_cell(dest).ok_or(FleetError::NoAccess(dest))?;
        ctx.path_finder.route(ctx.layout, from, to)?;
        Ok(())
    }

    /// Claims are already released; log and head back to standby.
    fn roll_back(
        &mut self,
        ctx:    &FleetContext<'_>,
        dock:   DockId,
        color:  Color,
        reason: FleetError,
    ) -> StepEvent {
        debug!(forklift = %self.id, %dock, %color, %reason, "claim rolled back");
        self.head_to_standby(ctx);
        StepEvent::ClaimRolledBack { dock, color, reason }
    }

    // ── Loading: pickup at the source ─────────────────────────────────────

    fn pick_up(&mut self, ctx: &mut FleetContext<'_>) -> StepEvent {
        let Some(mut job) = self.job.take() else {
            warn!(forklift = %self.id, "loading without a job");
            self.go_idle();
            return StepEvent::Waiting;
        };
        let Some(pickup) = job.pickup.take() else {
            warn!(forklift = %self.id, "loading with the unit already on the forks");
            self.go_idle();
            return StepEvent::Waiting;
        };
        let color = job.color;

        let picked = match pickup {
            PickupClaim::Ledger(claim) => ctx.inventory.dock_mut(job.dock).consume(claim),
            PickupClaim::Stock(claim) => ctx.inventory.take_stock(claim),
        };
        if let Err(e) = picked {
            // The pickup claim is spent either way.
            if let Some(dropoff) = job.dropoff.take() {
                release_dropoff(ctx.inventory, dropoff);
            }
            debug!(forklift = %self.id, %color, error = %e, "pickup failed");
            self.go_idle();
            return StepEvent::PickupFailed { color, reason: e.into() };
        }

        if let Err(e) = self.route_to_site(ctx, job.dest) {
            self.undo_pickup(ctx.inventory, &job);
            if let Some(dropoff) = job.dropoff.take() {
                release_dropoff(ctx.inventory, dropoff);
            }
            debug!(forklift = %self.id, %color, error = %e, "destination unreachable, unit put back");
            self.go_idle();
            return StepEvent::PickupFailed { color, reason: e };
        }

        self.job = Some(job);
        self.state = ForkliftState::GoingToDest;
        StepEvent::PickedUp { color }
    }

    /// Return a unit picked up this step to where it came from.
    fn undo_pickup(&self, inventory: &mut Inventory, job: &Job) {
        let undone = match self.role {
            Role::Unloading => inventory.dock_mut(job.dock).restore(job.color, job.seq),
            Role::Loading => inventory.rack_mut(job.rack).add(1),
        };
        if let Err(e) = undone {
            warn!(forklift = %self.id, color = %job.color, error = %e, "could not undo pickup");
        }
    }

    // ── Unloading: drop-off at the destination ────────────────────────────

    fn put_down(&mut self, ctx: &mut FleetContext<'_>) -> StepEvent {
        let Some(mut job) = self.job.take() else {
            warn!(forklift = %self.id, "unloading without a job");
            self.go_idle();
            return StepEvent::Waiting;
        };
        let color = job.color;

        match job.dropoff.take() {
            Some(DropoffClaim::Space(claim)) => {
                if let Err(e) = ctx.inventory.store_unit(claim) {
                    return self.redirect_dropoff(ctx, job, e.into());
                }
            }
            Some(DropoffClaim::Ledger(claim)) => {
                ctx.inventory
                    .dock_mut(job.dock)
                    .consume(claim)
                    .unwrap_or_else(|e| panic!("{}: claimed delivery refused: {e}", self.id));
            }
            None => {
                let reason = FleetError::NoRack { color, what: "space" };
                return self.redirect_dropoff(ctx, job, reason);
            }
        }

        let completed = Self::try_complete(ctx, job.dock, job.seq);
        debug!(forklift = %self.id, dock = %job.dock, %color, "delivered unit");
        self.go_idle();
        StepEvent::Delivered { color, completed }
    }

    /// The unit is on the forks but its slot is gone: claim another slot
    /// and head there, or keep the unit and retry next tick.
    fn redirect_dropoff(
        &mut self,
        ctx:     &mut FleetContext<'_>,
        mut job: Job,
        reason:  FleetError,
    ) -> StepEvent {
        let color = job.color;
        self.state = ForkliftState::Unloading;
        if let Some(space) = ctx.inventory.reserve_space(color) {
            let rack = space.rack();
            let cell = ctx.inventory.rack(rack).cell();
            match self.route_to_site(ctx, cell) {
                Ok(()) => {
                    job.rack = rack;
                    job.dest = cell;
                    job.dropoff = Some(DropoffClaim::Space(space));
                    self.state = ForkliftState::GoingToDest;
                }
                Err(_) => ctx.inventory.release_space(space),
            }
        }
        debug!(forklift = %self.id, %color, %reason, "drop-off deferred");
        self.job = Some(job);
        StepEvent::DropoffDeferred { color, reason }
    }

    /// Close the dock's order if this delivery was its last unit.
    fn try_complete(ctx: &mut FleetContext<'_>, dock: DockId, seq: u64) -> Option<CompletedOrder> {
        let now = ctx.tick;
        let d = ctx.inventory.dock_mut(dock);
        if d.order_seq() != Some(seq) || !d.is_complete() {
            return None;
        }
        d.complete_order(now).ok()
    }

    /// Release every claim still held.  Used when a forklift is removed
    /// from the floor mid-job.
    pub fn abandon(&mut self, inventory: &mut Inventory) {
        if let Some(mut job) = self.job.take() {
            if let Some(pickup) = job.pickup.take() {
                release_pickup(inventory, pickup);
            }
            if let Some(dropoff) = job.dropoff.take() {
                release_dropoff(inventory, dropoff);
            }
        }
        self.go_idle();
    }
}
