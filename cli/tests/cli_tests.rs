#[test]
fn check() {
    trycmd::TestCases::new()
        .case("tests/check/*.toml")
        .default_bin_name("h5kit");
}

#[test]
fn diag() {
    trycmd::TestCases::new()
        .case("tests/diag/*.toml")
        .default_bin_name("h5kit");
}

#[test]
fn relayout() {
    trycmd::TestCases::new()
        .case("tests/relayout/*.toml")
        .default_bin_name("h5kit");
}
