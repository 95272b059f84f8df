pub mod date_util;
pub mod format_util;
pub mod number_util;
