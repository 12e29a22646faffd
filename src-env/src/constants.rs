/// Environment variable pointing at the project root
pub const CUCKOO_DIR: &str = "CUCKOO_DIR";

/// Output directory for generated data, relative to the project root
pub const DATA_GENERATED: &str = "data_generated";

/// Directory holding singular-value test cases, relative to the project root
pub const INPUT: &str = "input";
