// src/lib.rs

pub mod api;
pub mod cli;
pub mod commentary;
pub mod config;
pub mod db;
pub mod server;
pub mod state;
pub mod tasks;
pub mod web;
