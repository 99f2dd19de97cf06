mod check;
mod schema;

pub use check::{CheckArgs, check_command};
pub use schema::{SchemaArgs, schema_command};
