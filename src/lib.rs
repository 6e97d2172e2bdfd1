//! Student Portal - account registration and student profiles
//!
//! Visitors register an account, attach a one-to-one student profile
//! (student ID, major, GPA) and view it on a server-rendered page.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
