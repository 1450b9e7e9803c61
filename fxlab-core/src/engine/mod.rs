//! The walk-forward engine: bulk annotation, bracket simulation, and the
//! monthly driver.

pub mod precompute;
pub mod simulate;
pub mod walkforward;

pub use precompute::{annotate, month_spans, AnnotatedSeries};
pub use simulate::{simulate, Direction, SimError};
pub use walkforward::{
    monthly_walkforward, rsi_extreme_signal, MonthEntry, TradeIntent, WalkForwardError,
    WalkForwardSummary,
};
