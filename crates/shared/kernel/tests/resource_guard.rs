use machex_kernel::safe_nanoid;
use machex_kernel::security::resource::ResourceGuard;

#[test]
fn resource_guard_validates_and_prefixes() {
    assert_eq!(ResourceGuard::verify("item:abc", "item").unwrap(), "item:abc");

    assert_eq!(ResourceGuard::verify("abc", "item").unwrap(), "item:abc");

    assert!(ResourceGuard::verify("session:abc", "item").is_err());
}

#[test]
fn generated_keys_always_pass_the_shape_check() {
    for _ in 0..64 {
        let key = safe_nanoid!();
        assert!(ResourceGuard::is_safe_key(&key), "generated key rejected: {key}");
    }
}
