pub mod notification;
pub mod patron;
pub mod roster;
pub mod saturation;
pub mod search;

pub use notification::{Notification, NotificationKind, Notifications};
pub use patron::{
    NewPatron, Patron, PatronDefaults, PatronId, PatronPatch, SaturationReading,
    coerce_body_mass, format_number,
};
pub use roster::Roster;
pub use saturation::SaturationBand;
pub use search::NameFilter;
