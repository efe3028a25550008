//! Common types and utilities for fakeldap sinks.
//!
//! This crate provides the argument group shared by both output sinks
//! (LDIF file and LDAP server).

pub mod args;

pub use args::CommonPopulateArgs;
