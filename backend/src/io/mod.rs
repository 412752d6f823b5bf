//! Interface layer exposing the service over HTTP.

pub mod rest;
