// src/lib.rs

pub mod app;
pub mod engine_lib;
pub mod rendering_lib;
pub mod ui;
