mod builder_tests;
mod test_helpers;
