//! Command handlers organized by operation category.
//!
//! | Module | Commands | Engine component |
//! |--------|----------|------------------|
//! | `document` | 6 | DocumentStore |
//! | `tree` | 4 | TreeOps |

pub mod document;
pub mod tree;
