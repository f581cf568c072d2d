pub mod affiliate;
pub mod reorder;

pub use affiliate::affiliate_link;
pub use reorder::{days_until_reorder, reorder_notifications, ReorderItem, ReorderNotification};
