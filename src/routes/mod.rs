pub(crate) mod dashboard;
pub(crate) mod fleet;
pub(crate) mod health;
