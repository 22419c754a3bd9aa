// src/utils/mod.rs

pub mod hash;
pub mod jwt;
pub mod mail;
pub mod time;
pub mod upload;
