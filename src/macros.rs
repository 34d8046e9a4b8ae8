// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Owned row/header shorthand: `cells!["Tm", "Payroll"]` → `Vec<String>`.
#[macro_export]
macro_rules! cells {
    ($($cell:expr),* $(,)?) => {
        vec![$( ::std::string::String::from($cell) ),*]
    };
}
