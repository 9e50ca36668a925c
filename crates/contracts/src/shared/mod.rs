pub mod api_error;
pub mod list_query;
pub mod mutation;
