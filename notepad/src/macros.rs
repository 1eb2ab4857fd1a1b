#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)+) => ({
        $crate::__log::error!($($arg)+);
        ::std::process::exit(1)
    });
}
