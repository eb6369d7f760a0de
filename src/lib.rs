//! # Shop Admin Telegram Bot
//!
//! A Telegram bot for managing a small clothing storefront: multi-step
//! admin wizards for creating and editing products, catalog listing and
//! statistics, with pluggable persistence (JSON file or Postgres) and
//! photo hosting on Cloudinary.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod media;
pub mod session;
pub mod storage;
pub mod validation;
