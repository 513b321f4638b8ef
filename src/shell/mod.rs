pub(crate) mod gallery;
pub(crate) mod intro;
pub(crate) mod navbar;
pub(crate) mod router;
