pub mod category;
pub mod event;
pub mod organisation;

pub use category::Category;
pub use event::{EventDetail, EventSummary, ACTIVE_STATUS};
pub use organisation::Organisation;
