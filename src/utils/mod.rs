// src/utils/mod.rs
pub mod config;
pub mod pages;
pub mod qr;
pub mod storage;
