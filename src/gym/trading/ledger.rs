use serde::{Deserialize, Serialize};

use crate::{
    data::domain::{Cash, Price, Quantity},
    error::{DataError, StockGymResult},
};

/// The portfolio state machine: cash on one side, a single fully-allocated
/// position on the other.
///
/// The ledger is a pure capital-allocation account, owned exclusively by the
/// environment instance. Two invariants hold after every mutation:
///
/// - `cash + capital_invested` equals the episode's total capital exactly
///   (no capital is created or destroyed by the ledger; trading P&L lives in
///   the reward stream, see [`crate::gym::Reward`]);
/// - `capital_invested` reconciles with the cash reduction at the moment of
///   purchase: `units * nav`, with the flooring residual left as idle cash.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ledger {
    cash: Cash,
    quantity: Quantity,
    capital_invested: Cash,
    /// NAV per unit at the most recent purchase, while a position is open.
    purchase_nav: Option<Price>,
    /// The capital configured at reset; buys never deploy more than this.
    requested_capital: Cash,
}

impl Ledger {
    /// Zeroes the position and seeds cash with the episode capital.
    pub fn reset(&mut self, total_capital: Cash) {
        *self = Self {
            cash: total_capital,
            requested_capital: total_capital,
            ..Self::default()
        };
    }

    /// Deploys `min(cash, requested_capital)` at the given NAV.
    ///
    /// Unit count is floored, so the invested amount never exceeds what was
    /// requested and the fractional-unit remainder stays in cash. A
    /// non-positive NAV means corrupt upstream data and fails before any
    /// mutation.
    ///
    /// Returns the total quantity held after the purchase.
    pub fn buy(&mut self, nav: Price) -> StockGymResult<Quantity> {
        if nav.0 <= 0.0 {
            return Err(DataError::CorruptClosePrice(nav.0).into());
        }

        let deployable = self.cash.0.min(self.requested_capital.0);
        let units = (deployable / nav.0).floor();
        let spent = units * nav.0;

        self.cash -= Cash(spent);
        self.capital_invested += Cash(spent);
        self.quantity += Quantity(units);
        if units > 0.0 {
            self.purchase_nav = Some(nav);
        }

        Ok(self.quantity)
    }

    /// Liquidates the entire holding, returning invested capital to cash.
    ///
    /// Returns the pre-sale quantity: the sell-day reward is scaled by the
    /// position that was held going into the day, so the caller needs it
    /// after the ledger has already been zeroed.
    pub fn sell(&mut self) -> Quantity {
        let sold = self.quantity;

        self.cash += self.capital_invested;
        self.capital_invested = Cash(0.0);
        self.quantity = Quantity(0.0);
        self.purchase_nav = None;

        sold
    }

    pub fn cash(&self) -> Cash {
        self.cash
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn capital_invested(&self) -> Cash {
        self.capital_invested
    }

    pub fn purchase_nav(&self) -> Option<Price> {
        self.purchase_nav
    }

    pub fn is_invested(&self) -> bool {
        self.quantity.0 > 0.0
    }

    /// Cash plus invested capital. Constant across an episode.
    pub fn total_allocated(&self) -> Cash {
        self.cash + self.capital_invested
    }
}
