mod domain_tests;
mod submit_tests;
