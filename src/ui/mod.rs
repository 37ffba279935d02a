pub mod icons;
pub mod json;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use json::bill_entries;
pub use output::{header, info, money, success, warn};
pub use table::{bill_table, total_line};
pub use theme::{theme, Theme};
