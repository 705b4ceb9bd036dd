//! # IO Module
//!
//! Interface layer exposing the importer to callers. Currently a REST API;
//! nothing here contains business logic, only translation between HTTP and
//! the domain layer.

pub mod rest;
