/// Creates a `String` from anything that implements `ToString`.
///
/// # Examples
/// ```
/// use okteto_tagger_utils::string;
///
/// assert_eq!(string!("okteto"), String::from("okteto"));
/// ```
#[macro_export]
macro_rules! string {
    ($str:expr) => {
        ::std::string::ToString::to_string(&$str)
    };
}

/// Creates a `Vec<String>` from a list of values that
/// implement `ToString`.
///
/// # Examples
/// ```
/// use okteto_tagger_utils::string_vec;
///
/// let tags = string_vec!["okteto", format!("okteto-{}", "sha")];
/// assert_eq!(tags, vec![String::from("okteto"), String::from("okteto-sha")]);
/// ```
#[macro_export]
macro_rules! string_vec {
    ($($string:expr),* $(,)?) => {
        {
            vec![
                $($crate::string!($string),)*
            ]
        }
    };
}
