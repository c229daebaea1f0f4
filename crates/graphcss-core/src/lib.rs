//! GraphCSS Core Types and Definitions
//!
//! This crate provides the foundational types that the GraphCSS style engine
//! reads from and produces for a diagram model. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Classes**: String-interned style class names ([`class::ClassName`])
//! - **Elements**: Element kinds and the read-only element view the engine
//!   matches against ([`element`] module)
//! - **Draw**: Typed value domains for line brushes, arrows, node shapes and
//!   alignment ([`draw`] module)

pub mod class;
pub mod color;
pub mod draw;
pub mod element;
