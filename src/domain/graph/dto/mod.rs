pub mod graph_fill_request;
pub mod graph_merge_request;
pub mod graph_parse_request;
pub mod graph_response;
