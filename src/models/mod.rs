pub mod account;
pub mod report_date;
pub mod row;

pub use account::AdAccount;
pub use report_date::report_date;
pub use row::SheetRow;
