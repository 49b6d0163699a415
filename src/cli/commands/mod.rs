pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod entries;
pub mod goal;
pub mod report;
pub mod transactions;
