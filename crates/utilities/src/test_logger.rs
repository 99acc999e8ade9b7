/// Initialises a logger for tests, the output is captured by the test harness.
pub fn test_logger() {
    // Tests run in parallel, so ignore repeated initialisation.
    let _ = env_logger::builder().is_test(true).try_init();
}
