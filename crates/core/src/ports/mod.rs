mod command;
mod fetcher;
mod pagination;

pub use command::*;
pub use fetcher::*;
pub use pagination::*;
