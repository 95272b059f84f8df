pub mod format_service;
