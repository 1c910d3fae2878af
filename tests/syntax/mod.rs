pub mod tests_xml;
