//! Job-shop domain models.
//!
//! Provides the problem description and the solution representation
//! consumed by the local-search engine.
//!
//! # Domain Mappings
//!
//! | u-jobshop | Manufacturing | Computing |
//! |-----------|---------------|-----------|
//! | Instance | Production order book | Batch of jobs |
//! | Operation | Routing step | Task |
//! | Machine | Work center | Processor |
//! | Schedule | Production plan | Execution timeline |

mod instance;
mod operation;
mod schedule;

pub use instance::{Instance, ParseError};
pub use operation::Operation;
pub use schedule::Schedule;
