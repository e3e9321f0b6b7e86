//! Raw SQL operations, one module per table.

pub mod document_ops;
pub mod kv_ops;
