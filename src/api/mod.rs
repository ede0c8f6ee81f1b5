pub mod drive;
pub mod security;
pub mod sites;
