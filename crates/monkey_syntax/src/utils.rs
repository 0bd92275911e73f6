#[cfg(test)]
macro_rules! assert_snapshot_with_source {
    ($source:expr => $output:expr, @$snapshot:literal) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_snapshot!($output, @$snapshot);
        })
    }};
}
#[cfg(test)]
pub(crate) use assert_snapshot_with_source;
