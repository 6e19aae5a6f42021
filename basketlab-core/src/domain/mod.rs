//! Domain types shared by the codec, engine, and analytics.

mod candle;
mod equity;
mod position;
mod series;
mod trade;

pub use candle::Candle;
pub use equity::EquityPoint;
pub use position::Position;
pub use series::{BatchError, SeriesBatch, SymbolSeries};
pub use trade::{ExitReason, Trade, TradeSide};
