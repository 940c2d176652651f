pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod meeting;
pub mod models;
pub mod navigation;
pub mod pages;
pub mod policy;
pub mod session;
pub mod storage;
