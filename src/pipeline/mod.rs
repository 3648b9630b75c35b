pub mod cytotox;
pub mod query;
