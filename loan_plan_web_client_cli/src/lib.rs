pub mod logic;

/// Where the web service listens by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Path of the plan endpoint, relative to the base URL.
pub const GENERATE_PLAN_PATH: &str = "generate_plan";
