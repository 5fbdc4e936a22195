mod credit;
mod normalize;
mod snapshot;

pub use credit::{ArtistCredit, CreditParser};
pub use normalize::{normalize_snapshots, ChartEntry};
pub use snapshot::{load_snapshots, ChartSnapshot, RawChartEntry};
