use super::*;
use pretty_assertions::assert_eq;

fn store_and_memory() -> (VariableStore, Memory) {
    (VariableStore::default(), Memory::default())
}

#[test]
fn test_first_lookup_creates_zero() {
    let (mut vars, mut memory) = store_and_memory();
    let x = vars.lookup_or_create("x", &mut memory).unwrap();

    assert_eq!(memory.leaf_value(x), Ok(0));
    assert_eq!(x.tier(), Tier::Durable);
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_lookup_is_stable() {
    let (mut vars, mut memory) = store_and_memory();
    let first = vars.lookup_or_create("total", &mut memory).unwrap();
    let second = vars.lookup_or_create("total", &mut memory).unwrap();

    assert_eq!(first, second);
    assert_eq!(vars.len(), 1);
    assert_eq!(memory.used(Tier::Durable), 2);
}

#[test]
fn test_identifiers_are_case_sensitive() {
    let (mut vars, mut memory) = store_and_memory();
    let lower = vars.lookup_or_create("a", &mut memory).unwrap();
    let upper = vars.lookup_or_create("A", &mut memory).unwrap();
    assert_ne!(lower, upper);
}

#[test]
fn test_get_does_not_create() {
    let (mut vars, mut memory) = store_and_memory();
    assert_eq!(vars.get("y"), None);
    assert!(vars.is_empty());

    let y = vars.lookup_or_create("y", &mut memory).unwrap();
    assert_eq!(vars.get("y"), Some(y));
}

#[test]
fn test_collisions_chain_in_one_bucket() {
    let mut vars = VariableStore::new(1, 31);
    let mut memory = Memory::default();
    let names = ["a", "b", "c1", "zz"];
    let ids: Vec<_> = names
        .iter()
        .map(|n| vars.lookup_or_create(n, &mut memory).unwrap())
        .collect();

    for (name, id) in names.iter().zip(&ids) {
        assert_eq!(vars.get(name), Some(*id));
    }
    assert_eq!(vars.len(), 4);
}

#[test]
fn test_max_length_identifier() {
    let (mut vars, mut memory) = store_and_memory();
    let ok = "a".repeat(31);
    assert!(vars.lookup_or_create(&ok, &mut memory).is_ok());

    let long = "a".repeat(32);
    let err = vars.lookup_or_create(&long, &mut memory).unwrap_err();
    assert_eq!(
        err,
        VarError::TooLong {
            name: long,
            len: 32,
            max: 31
        }
    );
    assert_eq!(err.code(), "E0004");
}

#[test]
fn test_empty_name_is_an_ordinary_key() {
    let (mut vars, mut memory) = store_and_memory();
    let empty = vars.lookup_or_create("", &mut memory).unwrap();
    assert_eq!(vars.bucket_of(""), 0);
    assert_eq!(vars.get(""), Some(empty));
}

#[test]
fn test_durable_exhaustion() {
    let mut vars = VariableStore::default();
    let mut memory = Memory::new(2, 8);
    vars.lookup_or_create("a", &mut memory).unwrap();

    let err = vars.lookup_or_create("b", &mut memory).unwrap_err();
    assert!(matches!(
        err,
        VarError::Memory(MemoryError::Exhausted {
            tier: Tier::Durable,
            ..
        })
    ));
    // The failed binding must not be recorded.
    assert_eq!(vars.get("b"), None);
}

#[test]
fn test_failed_binding_leaves_durable_tier_untouched() {
    let mut vars = VariableStore::default();
    let mut memory = Memory::new(3, 8);
    vars.lookup_or_create("a", &mut memory).unwrap();

    assert!(vars.lookup_or_create("b", &mut memory).is_err());
    assert!(vars.lookup_or_create("c", &mut memory).is_err());
    assert_eq!(memory.used(Tier::Durable), 2);
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_hash_values() {
    // Values computed independently of this implementation.
    let cases: [(&str, u32, usize); 5] = [
        ("a", 3_826_102_752, 480),
        ("total", 1_615_274_267, 283),
        ("counter2", 3_045_499_134, 254),
        ("Zz9", 168_708_070, 998),
        ("abcdefghijklmnopqrstuvwxyzABCDE", 2_017_770_809, 313),
    ];
    let vars = VariableStore::default();
    for (name, hash, bucket) in cases {
        assert_eq!(hash_identifier(name.as_bytes()), hash, "hash of {name:?}");
        assert_eq!(vars.bucket_of(name), bucket, "bucket of {name:?}");
    }
    assert_eq!(hash_identifier(b""), 0);
    assert_ne!(hash_identifier(b"ab"), hash_identifier(b"ba"));
}

mod proptest_hash {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bucket_in_range(name in "[a-zA-Z][a-zA-Z0-9]{0,30}", buckets in 1usize..4096) {
            let vars = VariableStore::new(buckets, 31);
            prop_assert!(vars.bucket_of(&name) < buckets);
        }

        #[test]
        fn lookup_roundtrips(names in proptest::collection::vec("[a-z][a-z0-9]{0,6}", 1..40)) {
            let mut vars = VariableStore::new(16, 31);
            let mut memory = Memory::default();
            for name in &names {
                let id = vars.lookup_or_create(name, &mut memory).unwrap();
                prop_assert_eq!(vars.get(name), Some(id));
            }
        }
    }
}
