mod chart;
mod fleet;
mod timed_record;
mod window;

pub use chart::{ChartPayload, GeoPoint, MapChart, MapPoint, MapView, SeriesChart, TraceStyle};
pub use fleet::{Fleet, FleetRow, StationSnapshot};
pub use timed_record::TimedRecord;
pub use window::{WindowChoice, WindowOption, WindowSpec, WindowTable};
