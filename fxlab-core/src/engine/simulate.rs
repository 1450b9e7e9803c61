//! Bracket trade simulator.
//!
//! Given an adjusted entry, a stop-loss/take-profit bracket, and a bounded
//! window of future bars, resolves the trade deterministically:
//!
//! - Entry pays `spread/2 + slippage` in the adverse direction.
//! - Bars are scanned chronologically for bracket touches. When both levels
//!   are touched inside one bar, the assumed intrabar path is
//!   Open→High→Low→Close: the high side resolves first, which favors the
//!   take-profit for longs and the stop-loss for shorts.
//! - If nothing is touched across the whole window, the trade is
//!   marked-to-market at the last bar's close.
//! - The exit leg deducts a flat `spread/2 + slippage` again, so the full
//!   round trip costs `spread + 2*slippage` per trade.
//!
//! Inverted brackets (e.g. a long take-profit below entry) are not
//! validated — the touch tests are applied blindly and the caller owns the
//! consequences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Candle;
use crate::sessions::{Session, SessionCosts};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

/// Errors from the trade simulator.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("empty future window: the simulator needs at least one bar to resolve a trade")]
    EmptyWindow,
}

/// Resolve a bracket trade over `future` and return signed P&L in price
/// units, net of the session's modeled costs.
///
/// `future` must hold at least one bar strictly after the signal bar;
/// an empty window is an `EmptyWindow` error.
pub fn simulate(
    future: &[Candle],
    entry: f64,
    stop_loss: f64,
    take_profit: f64,
    session: Session,
    direction: Direction,
) -> Result<f64, SimError> {
    let last_close = future.last().ok_or(SimError::EmptyWindow)?.close;
    let SessionCosts { spread, slippage } = session.costs();
    let half_turn = spread / 2.0 + slippage;

    match direction {
        Direction::Long => {
            let entry = entry + half_turn;
            for bar in future {
                let hit_tp = bar.high >= take_profit;
                let hit_sl = bar.low <= stop_loss;
                if hit_tp && hit_sl {
                    // High first on the assumed path: take-profit wins.
                    return Ok((take_profit - entry) - half_turn);
                }
                if hit_tp {
                    return Ok((take_profit - entry) - half_turn);
                }
                if hit_sl {
                    return Ok((stop_loss - entry) - half_turn);
                }
            }
            Ok((last_close - entry) - half_turn)
        }
        Direction::Short => {
            let entry = entry - half_turn;
            for bar in future {
                let hit_tp = bar.low <= take_profit;
                let hit_sl = bar.high >= stop_loss;
                if hit_tp && hit_sl {
                    // High first on the assumed path, and for shorts the
                    // high side is the stop: stop-loss wins.
                    return Ok((entry - stop_loss) - half_turn);
                }
                if hit_tp {
                    return Ok((entry - take_profit) - half_turn);
                }
                if hit_sl {
                    return Ok((entry - stop_loss) - half_turn);
                }
            }
            Ok((entry - last_close) - half_turn)
        }
    }
}
