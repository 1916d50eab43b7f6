pub mod loan;
pub mod record;
pub mod setup;
pub mod show;
pub mod spending;
pub mod ui;
