use skelgrid::cube::CubeIndex;

#[test]
fn serializes_as_a_three_element_array() {
    let i = CubeIndex::new(1, 2, 3);
    let json = serde_json::to_string(&i).unwrap();
    assert_eq!(json, "[1,2,3]");
    let back: CubeIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(back, i);
}

#[test]
fn rejects_wrong_arity() {
    assert!(serde_json::from_str::<CubeIndex>("[1,2]").is_err());
    assert!(serde_json::from_str::<CubeIndex>("[1,2,3,4]").is_err());
}

#[test]
fn display_and_debug() {
    let i = CubeIndex::new(4, 0, 2);
    assert_eq!(i.to_string(), "( 4 , 0 , 2 )");
    assert_eq!(format!("{i:?}"), "CubeIndex(4, 0, 2)");
}
