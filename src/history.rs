pub mod guard;
pub mod store;

pub use guard::{ChangeToken, HistoryChange};
pub use store::{History, HistoryInfo};
