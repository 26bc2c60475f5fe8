// Domain layer module exports
// The domain knows nothing about HTTP or the database driver

pub mod repositories;
pub mod vehicle;
