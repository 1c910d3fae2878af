pub mod tests_completion;
pub mod tests_host;
