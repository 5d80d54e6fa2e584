/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Backend address used when no environment override is present
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";

    /// Environment variable holding the backend base URL
    pub const API_URL_ENV: &'static str = "FUND_API_URL";

    /// Default page size for the fund explorer search
    pub const DEFAULT_FUND_LIMIT: u32 = 50;

    /// Page sizes offered by the fund explorer
    pub const FUND_LIMIT_CHOICES: [u32; 3] = [25, 50, 100];

    /// Default number of rows for the top performers table
    pub const DEFAULT_TOP_LIMIT: u32 = 10;

    /// Row counts offered by the top performers table
    pub const TOP_LIMIT_CHOICES: [u32; 3] = [5, 10, 20];

    /// Number of AMCs kept in the market share chart
    pub const AMC_SHARE_TOP_N: usize = 10;

    /// Default recommendation form amount, in rupees
    pub const DEFAULT_INVESTMENT_AMOUNT: u64 = 50_000;
}
