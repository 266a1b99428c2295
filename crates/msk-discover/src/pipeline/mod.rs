mod assemble;
pub use assemble::assemble;

mod resolve;
pub use resolve::resolve;

mod discover;
pub use discover::{Discovery, TargetSource};
