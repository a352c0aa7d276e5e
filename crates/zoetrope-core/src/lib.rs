//! Zoetrope Core Types and Definitions
//!
//! This crate provides the foundational types for the Zoetrope diagram
//! studio. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Semantic**: The pre-layout graph model ([`semantic`] module)
//! - **Scene**: The compiled, positioned scene model ([`scene`] module)
//! - **Theme**: The two display themes and the non-recompiling theme
//!   transform ([`theme`] module)

pub mod color;
pub mod geometry;
pub mod scene;
pub mod semantic;
pub mod theme;
