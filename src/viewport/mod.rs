pub(crate) mod observer;
