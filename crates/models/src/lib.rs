#![warn(missing_docs)]
//! Block shapes dispatched by a closed enum, the shell/content compositor,
//! and block models derived from canonical shapes.

pub mod blocks;
mod compositor;
mod shape;

pub use compositor::ShellModel;
pub use shape::Shape;
