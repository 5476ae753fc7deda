//! 数据访问层（Repository）

mod alert_repo;
mod outage_repo;
mod reading_repo;
mod region_repo;

pub use alert_repo::{severity_then_recent, AlertStore, InMemoryAlertRepository, NewAlert};
pub use outage_repo::{InMemoryOutageRepository, NewOutage, OutageStore};
pub use reading_repo::{InMemoryReadingRepository, NewReading, ReadingStore};
pub use region_repo::{parse_outages, parse_regions, RegionRepository};
