//! Numerical methods
//!
//! This module collects the general-purpose numerics the chemistry is built
//! on. Everything here is pure and stateless: callers pass a function and
//! bounds, and get a number back.
//!
//! # Core Concepts
//!
//! - **Quadrature**: adaptive composite Gauss–Legendre integration with
//!   improper-interval handling, used for thermal phase-space integrals
//!
//! # Available Methods
//!
//! Currently implemented:
//! - **48-point Gauss–Legendre** with adaptive bisection ([`gauss_quad`])

mod quadrature;

pub use quadrature::gauss_quad;
