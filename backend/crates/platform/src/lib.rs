//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, random bytes)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Media file storage (uploaded photos and post images)
//! - Minimal HTML helpers for the page surface

pub mod cookie;
pub mod crypto;
pub mod html;
pub mod media;
pub mod password;
