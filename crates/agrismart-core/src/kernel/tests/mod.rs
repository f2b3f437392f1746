pub(crate) mod support;

mod bootstrap_tests;
