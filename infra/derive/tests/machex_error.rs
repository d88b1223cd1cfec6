#[test]
fn machex_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/machex_error_pass.rs");
}
