//! # cva_models (L2: Business Logic)
//!
//! Short-rate dynamics and the swap being valued.
//!
//! This crate provides:
//! - The `StochasticModel` trait and the Hull-White one-factor model
//! - Swap terms (`SwapSpec`, `SwapPosition`)
//! - Pathwise swap valuation (`SwapValuer`, `ValuePath`)
//!
//! ## Design Principles
//!
//! - **Static dispatch** for the model: stepping is an associated function,
//!   no trait objects in the hot loop
//! - **Pure valuation**: a value path depends only on its rate path and the
//!   swap terms
//! - **Validated parameters**: constructors return `ValidationError` before
//!   any path is touched

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
