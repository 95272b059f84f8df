pub mod device_type;
pub mod table_filter;
