mod resolve;
mod types;

pub use resolve::resolve_jail;
pub use types::ResolveError;
