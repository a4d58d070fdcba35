pub(crate) mod account;
pub(crate) mod auth;
pub(crate) mod posts;
