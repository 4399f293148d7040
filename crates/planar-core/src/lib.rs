//! Planar Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Planar flattening
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Interned names for layers and containers ([`identifier::Id`])
//! - **Geometry**: 3D points, vectors and the depth tolerance ([`geometry`] module)
//! - **Elements**: The closed set of drawing element kinds ([`element`] module)

pub mod element;
pub mod geometry;
pub mod identifier;
