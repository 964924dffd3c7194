// Library for tests to access modules

pub mod config;
pub mod history;
pub mod models;
pub mod routes;
pub mod sampler;
pub mod sysinfo_repo;
pub mod worker;
