// src/macros.rs

#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg form gives String::new()
    () => {
        ::std::string::String::new()
    };
    // Single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
