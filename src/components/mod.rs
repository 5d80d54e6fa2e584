pub mod analysis;
pub mod compare;
pub mod dashboard;
pub mod forecast;
pub mod funds;
pub mod recommend;
pub mod select_field;
pub mod series_table;
pub mod stat_cards;
pub mod status;

pub use analysis::Analysis;
pub use dashboard::Dashboard;
pub use funds::FundExplorer;
pub use recommend::Recommend;
