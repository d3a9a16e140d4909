//! Solution encodings manipulated by local search.
//!
//! - **Resource order**: one permutation of operations per machine. Every
//!   move of the neighborhood structures edits exactly one machine's
//!   permutation and yields a fresh value.
//!
//! # Reference
//! Cheng et al. (1996), "A Tutorial Survey of JSSP using GA", Part I
//! (representation taxonomy)

mod resource_order;

pub use resource_order::ResourceOrder;
