//! Value objects - immutable types that represent domain concepts

mod category;
mod collection;
mod name_key;
mod sex;
mod timestamp;
mod weight;

pub use category::Category;
pub use collection::Collection;
pub use name_key::{NameKey, NameKeyParseError};
pub use sex::{Sex, SexParseError};
pub use timestamp::{next_modified_at, now_timestamp, Clock, ManualClock, SystemClock};
pub use weight::Weight;
