pub mod tests_imports;
pub mod tests_resolve;
pub mod tests_schema;
