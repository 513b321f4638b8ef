pub(crate) mod cursor;
pub(crate) mod parallax;
pub(crate) mod ripple;
pub(crate) mod text_reveal;
