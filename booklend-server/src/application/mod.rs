pub(crate) mod auth_service;
pub(crate) mod lending_service;
