//! `Order` — a quantity of goods split across the fixed color set.

use std::fmt;

use rand::Rng;

use wh_core::Color;

use crate::{InventoryError, InventoryResult};

/// A per-color unit ledger.
///
/// Invariant: `total == by_color.iter().sum()` after every mutation.  Amounts
/// are unsigned, so a negative amount is unrepresentable; operations that
/// would drive an amount below zero fail with
/// [`InventoryError::InvalidAmount`] and leave the order unchanged.
///
/// Nothing here rebalances colors.  Moving one unit means one `take` on the
/// source and one `put` (or rack add) on the destination, both done by the
/// caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Order {
    total:    u32,
    by_color: [u32; Color::COUNT],
}

impl Order {
    /// An order with no units.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from explicit `(color, units)` pairs.  Repeated colors add up.
    pub fn from_amounts<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (Color, u32)>,
    {
        let mut order = Self::empty();
        for (color, units) in amounts {
            order.by_color[color.index()] += units;
            order.total += units;
        }
        order
    }

    /// `units` of a single color.
    pub fn single(color: Color, units: u32) -> Self {
        Self::from_amounts([(color, units)])
    }

    /// Split `total` pseudo-randomly across all colors.
    ///
    /// The first `N-1` colors each draw a share of what is left, capped so
    /// that one unit per remaining color could still be left over; the last
    /// color absorbs the remainder.  This yields one valid random
    /// composition, not a uniform draw over all compositions.
    pub fn random<R: Rng + ?Sized>(total: u32, rng: &mut R) -> Self {
        let mut by_color = [0u32; Color::COUNT];
        let mut remaining = total;
        let last = Color::COUNT - 1;

        for (i, slot) in by_color.iter_mut().take(last).enumerate() {
            let cap = remaining.saturating_sub((last - i) as u32);
            let share = rng.gen_range(0..=cap);
            *slot = share;
            remaining -= share;
        }
        by_color[last] = remaining;

        Self { total, by_color }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[inline]
    pub fn amount(&self, color: Color) -> u32 {
        self.by_color[color.index()]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Snapshot of every color's amount, in [`Color::ALL`] order.
    pub fn all_amounts(&self) -> Vec<(Color, u32)> {
        Color::ALL.iter().map(|&c| (c, self.amount(c))).collect()
    }

    /// Colors with at least one unit left.
    pub fn colors_remaining(&self) -> Vec<Color> {
        Color::ALL.into_iter().filter(|&c| self.amount(c) > 0).collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Overwrite one color's amount and recompute the total.
    pub fn set_amount(&mut self, color: Color, amount: u32) -> InventoryResult<()> {
        let others = self.total - self.amount(color);
        let total = others
            .checked_add(amount)
            .ok_or(InventoryError::AmountOverflow { color })?;
        self.by_color[color.index()] = amount;
        self.total = total;
        Ok(())
    }

    /// Remove `units` of `color`.  Fails without mutating if fewer are left.
    pub fn take(&mut self, color: Color, units: u32) -> InventoryResult<()> {
        let have = self.amount(color);
        if units > have {
            return Err(InventoryError::InvalidAmount { requested: units, available: have });
        }
        self.set_amount(color, have - units)
    }

    /// Add `units` of `color`.
    pub fn put(&mut self, color: Color, units: u32) -> InventoryResult<()> {
        let have = self.amount(color);
        let amount = have
            .checked_add(units)
            .ok_or(InventoryError::AmountOverflow { color })?;
        self.set_amount(color, amount)
    }

    /// `true` if no color in `self` exceeds the same color in `other`.
    pub fn is_covered_by(&self, other: &Order) -> bool {
        Color::ALL.iter().all(|&c| self.amount(c) <= other.amount(c))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order(total={}", self.total)?;
        for (color, units) in self.all_amounts() {
            if units > 0 {
                write!(f, ", {color}={units}")?;
            }
        }
        f.write_str(")")
    }
}
