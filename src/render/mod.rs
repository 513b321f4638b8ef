pub(crate) mod ripple_cpu;
