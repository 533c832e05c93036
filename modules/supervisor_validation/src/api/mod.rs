pub mod native;
pub mod rest;
