//! Debug output over the ESP serial console.
//!
//! With the `esp32-log` feature the `log!` macro prints through `esp-println`.
//! Without it the arguments are still type-checked but nothing is emitted.

#[cfg(feature = "esp32-log")]
macro_rules! log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! log {
    ($($arg:tt)*) => {
        if false {
            ::core::mem::drop(::core::format_args!($($arg)*));
        }
    };
}

pub(crate) use log;
