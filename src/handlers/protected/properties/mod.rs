pub mod create;
pub mod delete;
pub mod detail;
pub mod documents;
pub mod images;
pub mod list;
pub mod update;
